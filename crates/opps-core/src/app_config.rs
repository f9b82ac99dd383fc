use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub coordinates_path: PathBuf,
    /// Page size used when the caller does not supply one.
    pub default_page_size: usize,
    /// Number of page links shown around the current page.
    pub page_window: usize,
    /// Upper bound on a single platform location request.
    pub geo_timeout_secs: u64,
    /// Radius applied to proximity searches when the caller gives none.
    pub default_radius_miles: Option<f64>,
}
