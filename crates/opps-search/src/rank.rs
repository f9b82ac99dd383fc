//! Result ordering.

use std::cmp::Ordering;

use opps_core::{distance_miles, CoordinateTable, Coordinates, Listing};

use crate::query::SortMode;

/// The user's position together with the table used to place listings that
/// carry only a location label.
#[derive(Debug, Clone, Copy)]
pub struct Proximity<'t> {
    pub user: Coordinates,
    pub table: &'t CoordinateTable,
}

impl<'t> Proximity<'t> {
    #[must_use]
    pub fn new(user: Coordinates, table: &'t CoordinateTable) -> Self {
        Self { user, table }
    }

    /// Distance in miles to the listing, if its position can be resolved.
    #[must_use]
    pub fn distance_to(&self, listing: &Listing) -> Option<f64> {
        self.table
            .resolve(listing)
            .map(|pos| distance_miles(self.user, pos))
            .filter(|d| d.is_finite())
    }
}

/// Order `items` for display.
///
/// `Default` keeps the input order. `Nearby` orders listings with a
/// resolvable position by ascending distance, then the rest in input order;
/// equal distances keep input order. Without a user position `Nearby` falls
/// back to input order.
#[must_use]
pub fn rank<'a>(
    items: Vec<&'a Listing>,
    mode: SortMode,
    proximity: Option<Proximity<'_>>,
) -> Vec<&'a Listing> {
    let proximity = match (mode, proximity) {
        (SortMode::Default, _) => return items,
        (SortMode::Nearby, None) => {
            tracing::debug!("nearby sort requested without a user position; keeping default order");
            return items;
        }
        (SortMode::Nearby, Some(proximity)) => proximity,
    };

    let mut keyed: Vec<(Option<f64>, usize, &'a Listing)> = items
        .into_iter()
        .enumerate()
        .map(|(index, listing)| (proximity.distance_to(listing), index, listing))
        .collect();

    keyed.sort_unstable_by(|a, b| compare_distance(a.0, b.0).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, _, listing)| listing).collect()
}

/// Known distances ascend; unknown ones sort last.
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
