use serde::{Deserialize, Serialize};

/// Lifecycle of the geolocation provider.
///
/// `Prompt` is the starting state. `Denied` and `Unsupported` hold until an
/// explicit re-request; `Granted` holds for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Prompt,
    Granted,
    Denied,
    Unsupported,
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionState::Prompt => write!(f, "prompt"),
            PermissionState::Granted => write!(f, "granted"),
            PermissionState::Denied => write!(f, "denied"),
            PermissionState::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Answer from a platform's non-prompting permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformPermission {
    Granted,
    Denied,
    Prompt,
}
