use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both components are finite and inside the valid degree ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// An article, job posting, or opportunity as shaped by the fetch layer.
///
/// The query engine never mutates listings; it filters, orders and slices
/// borrowed references to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    /// Human-readable location label, e.g. `"New York"` or `"Remote"`.
    #[serde(default)]
    pub location: Option<String>,
    /// Explicit coordinates; take precedence over the `location` label.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Returns `true` if the listing's location label is the `"Remote"` sentinel.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|loc| loc.trim().eq_ignore_ascii_case(crate::REMOTE))
    }
}
