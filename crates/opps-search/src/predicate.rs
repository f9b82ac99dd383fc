//! Facet filtering.

use opps_core::Listing;

use crate::query::QuerySpec;

const ANY: &str = "all";

/// Compose the spec's facets into one predicate. Facets are AND-combined;
/// an absent facet matches every listing.
///
/// A facet is absent when it is `None`, blank, or the sentinel `all`
/// (case-insensitive). The sentinel does not apply to free text, so
/// searching for the word "all" still works.
#[must_use]
pub fn build_predicate(spec: &QuerySpec) -> impl Fn(&Listing) -> bool {
    let text = trimmed(spec.search_text.as_deref()).map(str::to_lowercase);
    let category = facet(spec.category.as_deref()).map(str::to_owned);
    let tag = facet(spec.tag.as_deref()).map(str::to_lowercase);
    let status = facet(spec.status.as_deref()).map(str::to_owned);

    move |listing: &Listing| {
        text.as_deref().is_none_or(|t| matches_text(listing, t))
            && category.as_deref().is_none_or(|c| listing.category == c)
            && tag.as_deref().is_none_or(|t| has_tag(listing, t))
            && status.as_deref().is_none_or(|s| listing.status == s)
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn facet(value: Option<&str>) -> Option<&str> {
    trimmed(value).filter(|v| !v.eq_ignore_ascii_case(ANY))
}

/// `needle` must already be lowercase.
fn matches_text(listing: &Listing, needle: &str) -> bool {
    listing.title.to_lowercase().contains(needle)
        || listing.description.to_lowercase().contains(needle)
        || listing
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

fn has_tag(listing: &Listing, wanted: &str) -> bool {
    listing.tags.iter().any(|tag| tag.to_lowercase() == wanted)
}
