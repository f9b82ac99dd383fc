pub mod app_config;
pub mod config;
pub mod coordinates;
pub mod distance;
pub mod listing;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinates::{load_coordinate_table, CoordinateTable, LocationEntry, ALL_LOCATIONS, REMOTE};
pub use distance::{distance_miles, EARTH_RADIUS_MILES};
pub use listing::{Coordinates, Listing};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read coordinates file {path}: {source}")]
    CoordinatesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse coordinates file: {0}")]
    CoordinatesFileParse(#[from] serde_yaml::Error),

    #[error("coordinate table validation failed: {0}")]
    Validation(String),
}
