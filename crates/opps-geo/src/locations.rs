//! Location dropdown ordering and radius filtering.
//!
//! Pure helpers; [`crate::GeolocationProvider`] feeds them its cached user
//! position.

use std::collections::HashSet;

use serde::Serialize;

use opps_core::{distance_miles, CoordinateTable, Coordinates, Listing, ALL_LOCATIONS, REMOTE};

use crate::error::GeoError;

/// One row of the location dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationOption {
    Label {
        label: String,
        /// Distance from the user, present only for labels ordered by proximity.
        #[serde(skip_serializing_if = "Option::is_none")]
        distance_miles: Option<f64>,
    },
    /// Divider between proximity-ordered labels and labels with no known position.
    Separator,
}

impl LocationOption {
    fn label(label: impl Into<String>) -> Self {
        Self::Label {
            label: label.into(),
            distance_miles: None,
        }
    }

    /// The label text, or `None` for a separator.
    #[must_use]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label { label, .. } => Some(label),
            Self::Separator => None,
        }
    }
}

/// Order location labels for the dropdown.
///
/// `"All Locations"` and `"Remote"` come first when present. With a user
/// position, labels known to `table` follow in ascending distance (ties keep
/// input order), then a separator, then unknown labels in input order.
/// Without one, the remaining labels are sorted alphabetically.
#[must_use]
pub fn sort_location_labels<S: AsRef<str>>(
    labels: &[S],
    user: Option<Coordinates>,
    table: &CoordinateTable,
) -> Vec<LocationOption> {
    let mut has_all = false;
    let mut has_remote = false;
    let mut seen = HashSet::new();
    let mut rest: Vec<&str> = Vec::new();

    for raw in labels {
        let label = raw.as_ref().trim();
        if label.is_empty() {
            continue;
        }
        if label.eq_ignore_ascii_case(ALL_LOCATIONS) {
            has_all = true;
        } else if label.eq_ignore_ascii_case(REMOTE) {
            has_remote = true;
        } else if seen.insert(label) {
            rest.push(label);
        }
    }

    let mut out = Vec::with_capacity(rest.len() + 3);
    if has_all {
        out.push(LocationOption::label(ALL_LOCATIONS));
    }
    if has_remote {
        out.push(LocationOption::label(REMOTE));
    }

    let Some(user) = user else {
        rest.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        out.extend(rest.into_iter().map(LocationOption::label));
        return out;
    };

    let mut known: Vec<(usize, &str, f64)> = Vec::new();
    let mut unknown: Vec<&str> = Vec::new();
    for (index, label) in rest.into_iter().enumerate() {
        match table.lookup(label) {
            Some(coords) => known.push((index, label, distance_miles(user, coords))),
            None => unknown.push(label),
        }
    }
    known.sort_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)));

    let needs_separator = !known.is_empty() && !unknown.is_empty();
    out.extend(known.into_iter().map(|(_, label, d)| LocationOption::Label {
        label: label.to_string(),
        distance_miles: Some(d),
    }));
    if needs_separator {
        out.push(LocationOption::Separator);
    }
    out.extend(unknown.into_iter().map(LocationOption::label));
    out
}

/// Validate a radius: non-finite is an error, negative clamps to zero.
///
/// # Errors
///
/// Returns [`GeoError::InvalidRadius`] for NaN or infinite input.
pub fn normalize_radius(radius_miles: f64) -> Result<f64, GeoError> {
    if !radius_miles.is_finite() {
        return Err(GeoError::InvalidRadius(radius_miles));
    }
    Ok(radius_miles.max(0.0))
}

/// Listings whose resolved position lies within `radius_miles` of `center`.
///
/// Remote listings and listings with no resolvable position never match.
#[must_use]
pub fn filter_within_radius<'a, I>(
    listings: I,
    center: Coordinates,
    radius_miles: f64,
    table: &CoordinateTable,
) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .filter(|listing| !listing.is_remote())
        .filter(|listing| {
            table
                .resolve(listing)
                .is_some_and(|pos| distance_miles(center, pos) <= radius_miles)
        })
        .collect()
}

/// Fallback used when the user's position is unknown: remote listings only.
#[must_use]
pub fn remote_only<'a, I>(listings: I) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .filter(|listing| listing.is_remote())
        .collect()
}
