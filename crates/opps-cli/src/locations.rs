use std::collections::HashSet;

use opps_core::{AppConfig, Listing, ALL_LOCATIONS};

use crate::session::Session;
use crate::SourceArgs;

/// Print the location dropdown as JSON on stdout.
///
/// # Errors
///
/// Returns an error if setup fails or the options cannot be serialized.
pub(crate) async fn run_locations(config: &AppConfig, source: &SourceArgs) -> anyhow::Result<()> {
    let session = Session::open(config, source).await?;
    let labels = dropdown_labels(&session.listings);
    let options = session.provider.sorted_locations(&labels);
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

/// `All Locations` followed by each distinct listing location, first seen
/// first.
pub(crate) fn dropdown_labels(listings: &[Listing]) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(ALL_LOCATIONS.to_string())
        .chain(
            listings
                .iter()
                .filter_map(|l| l.location.as_deref())
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        )
        .filter(|label| seen.insert(label.to_lowercase()))
        .collect()
}
