//! Shared setup for commands: coordinate table, listings and the location
//! provider.

use std::path::Path;
use std::sync::Arc;

use opps_core::{load_coordinate_table, AppConfig, Coordinates, Listing};
use opps_geo::{FixedLocation, GeolocationProvider, PermissionState, ProviderOptions};
use opps_search::Proximity;

use crate::SourceArgs;

pub(crate) struct Session {
    pub(crate) listings: Vec<Listing>,
    pub(crate) provider: GeolocationProvider<FixedLocation>,
}

impl Session {
    /// Load everything a command needs and resolve the user position, if one
    /// was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate table or listings file cannot be
    /// read, or if `--lat/--lon` are out of range.
    pub(crate) async fn open(config: &AppConfig, source: &SourceArgs) -> anyhow::Result<Self> {
        let table = Arc::new(load_coordinate_table(&config.coordinates_path)?);
        tracing::debug!(
            path = %config.coordinates_path.display(),
            locations = table.len(),
            "coordinate table loaded"
        );

        let listings = load_listings(&source.listings)?;
        let platform = match user_position(source)? {
            Some(position) => FixedLocation::at(position),
            None => FixedLocation::unsupported(),
        };

        let provider =
            GeolocationProvider::new(platform, table, ProviderOptions::from_app_config(config));
        let state = provider.initialize().await;
        tracing::info!(
            listings = listings.len(),
            permission = %state,
            "session ready"
        );
        if state != PermissionState::Granted {
            tracing::info!("no user position; geo features fall back to non-geo behavior");
        }

        Ok(Self { listings, provider })
    }

    pub(crate) fn proximity(&self) -> Option<Proximity<'_>> {
        self.provider
            .user_coordinates()
            .map(|user| Proximity::new(user, self.provider.coordinate_table()))
    }
}

pub(crate) fn user_position(source: &SourceArgs) -> anyhow::Result<Option<Coordinates>> {
    let (Some(lat), Some(lon)) = (source.lat, source.lon) else {
        return Ok(None);
    };
    let position = Coordinates::new(lat, lon);
    if !position.is_valid() {
        anyhow::bail!("position ({lat}, {lon}) is out of range");
    }
    Ok(Some(position))
}

/// Read a JSON array of listings.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a listing array.
pub(crate) fn load_listings(path: &Path) -> anyhow::Result<Vec<Listing>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read listings file {}: {e}", path.display()))?;
    let listings: Vec<Listing> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse listings file {}: {e}", path.display()))?;
    Ok(listings)
}
