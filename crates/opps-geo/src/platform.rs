//! The platform location capability the provider wraps.
//!
//! Implementations are injected into [`crate::GeolocationProvider`]; nothing
//! in this crate reaches for a process-wide location service.

use std::future::Future;

use opps_core::Coordinates;

use crate::error::GeoError;
use crate::permission::PlatformPermission;

pub trait LocationPlatform: Send + Sync + 'static {
    /// `false` when the host has no location capability at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Non-prompting permission query.
    ///
    /// Returns `None` when the platform cannot answer without prompting.
    fn query_permission(&self) -> impl Future<Output = Option<PlatformPermission>> + Send {
        std::future::ready(None)
    }

    /// Ask for the current position. May prompt the user.
    ///
    /// Denials surface as [`GeoError::PermissionDenied`].
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeoError>> + Send;
}

/// A platform that always reports one fixed position, or none at all.
///
/// Used by the CLI, where the user's position arrives as flags, and handy in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    position: Option<Coordinates>,
}

impl FixedLocation {
    #[must_use]
    pub fn at(position: Coordinates) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// A platform with no location capability.
    #[must_use]
    pub fn unsupported() -> Self {
        Self { position: None }
    }
}

impl LocationPlatform for FixedLocation {
    fn is_supported(&self) -> bool {
        self.position.is_some()
    }

    fn query_permission(&self) -> impl Future<Output = Option<PlatformPermission>> + Send {
        std::future::ready(self.position.map(|_| PlatformPermission::Granted))
    }

    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeoError>> + Send {
        std::future::ready(self.position.ok_or(GeoError::Unsupported))
    }
}
