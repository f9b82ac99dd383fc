use std::time::Duration;

use thiserror::Error;

/// Failures from the platform location capability or the provider around it.
///
/// None of these are fatal: callers fall back to non-geo ordering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request did not resolve within {after:?}")]
    ResolutionTimeout { after: Duration },

    #[error("location capability is not supported on this platform")]
    Unsupported,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("invalid radius: {0}")]
    InvalidRadius(f64),
}
