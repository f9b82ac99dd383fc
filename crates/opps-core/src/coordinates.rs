use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Coordinates, Listing};

/// Dropdown sentinel meaning "no location filter".
pub const ALL_LOCATIONS: &str = "All Locations";
/// Location label for listings with no physical place.
pub const REMOTE: &str = "Remote";

/// One known location label and its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct CoordinatesFile {
    pub locations: Vec<LocationEntry>,
}

/// Immutable label → coordinates lookup, loaded once at startup.
///
/// Labels are matched case-insensitively after trimming. The sentinels
/// [`ALL_LOCATIONS`] and [`REMOTE`] are never present, so they never resolve.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    by_label: HashMap<String, Coordinates>,
}

impl CoordinateTable {
    /// Build a table from entries, rejecting anything [`load_coordinate_table`]
    /// would reject.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on empty, duplicate or sentinel
    /// names and on out-of-range coordinates.
    pub fn from_entries(entries: Vec<LocationEntry>) -> Result<Self, ConfigError> {
        validate_entries(&entries)?;
        let by_label = entries
            .into_iter()
            .map(|e| (normalize_label(&e.name), Coordinates::new(e.lat, e.lon)))
            .collect();
        Ok(Self { by_label })
    }

    /// Coordinates for a location label, if the label is known.
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<Coordinates> {
        self.by_label.get(&normalize_label(label)).copied()
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(&normalize_label(label))
    }

    /// Resolve a listing's physical position: explicit coordinates first,
    /// then the `location` label through the table.
    #[must_use]
    pub fn resolve(&self, listing: &Listing) -> Option<Coordinates> {
        listing
            .coordinates
            .filter(Coordinates::is_valid)
            .or_else(|| listing.location.as_deref().and_then(|l| self.lookup(l)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

fn is_sentinel(label: &str) -> bool {
    let label = label.trim();
    label.eq_ignore_ascii_case(ALL_LOCATIONS) || label.eq_ignore_ascii_case(REMOTE)
}

/// Load and validate the coordinate table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_coordinate_table(path: &Path) -> Result<CoordinateTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CoordinatesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CoordinatesFile = serde_yaml::from_str(&content)?;

    CoordinateTable::from_entries(file.locations)
}

fn validate_entries(entries: &[LocationEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location name must be non-empty".to_string(),
            ));
        }

        if is_sentinel(&entry.name) {
            return Err(ConfigError::Validation(format!(
                "'{}' is a reserved location label",
                entry.name
            )));
        }

        if !Coordinates::new(entry.lat, entry.lon).is_valid() {
            return Err(ConfigError::Validation(format!(
                "location '{}' has out-of-range coordinates ({}, {})",
                entry.name, entry.lat, entry.lon
            )));
        }

        if !seen.insert(normalize_label(&entry.name)) {
            return Err(ConfigError::Validation(format!(
                "duplicate location name: '{}'",
                entry.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "coordinates_test.rs"]
mod tests;
