pub mod error;
pub mod locations;
pub mod permission;
pub mod platform;
pub mod provider;

pub use error::GeoError;
pub use locations::{
    filter_within_radius, normalize_radius, remote_only, sort_location_labels, LocationOption,
};
pub use permission::{PermissionState, PlatformPermission};
pub use platform::{FixedLocation, LocationPlatform};
pub use provider::{GeolocationProvider, ProviderOptions};
