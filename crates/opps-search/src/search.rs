use serde::Serialize;

use opps_core::Listing;
use opps_geo::{filter_within_radius, normalize_radius, remote_only};

use crate::paginate::{page_window, paginate, DEFAULT_WINDOW_SIZE};
use crate::predicate::build_predicate;
use crate::query::QuerySpec;
use crate::rank::{rank, Proximity};

/// One page of search results plus the navigation state around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<'a> {
    pub items: Vec<&'a Listing>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_prev: bool,
    pub page_window: Vec<usize>,
}

/// Filter, rank and paginate `listings` with the default page window.
#[must_use]
pub fn search<'a>(
    listings: &'a [Listing],
    spec: &QuerySpec,
    proximity: Option<Proximity<'_>>,
) -> ResultPage<'a> {
    search_with_window(listings, spec, proximity, DEFAULT_WINDOW_SIZE)
}

/// [`search`] with an explicit page-window size.
///
/// Facets are applied first, then the radius (when the spec has one), then
/// ranking, then pagination. Without a proximity a radius narrows the
/// results to remote listings.
#[must_use]
pub fn search_with_window<'a>(
    listings: &'a [Listing],
    spec: &QuerySpec,
    proximity: Option<Proximity<'_>>,
    window_size: usize,
) -> ResultPage<'a> {
    let predicate = build_predicate(spec);
    let mut matched: Vec<&'a Listing> = listings.iter().filter(|&l| predicate(l)).collect();

    if let Some(radius) = spec.radius_miles {
        matched = apply_radius(matched, radius, proximity);
    }

    let ranked = rank(matched, spec.sort_mode, proximity);
    let page = paginate(&ranked, spec.page, spec.page_size);

    tracing::debug!(
        total_items = page.total_items,
        page = page.current_page,
        total_pages = page.total_pages,
        sort = %spec.sort_mode,
        "search completed"
    );

    ResultPage {
        items: page.items.to_vec(),
        current_page: page.current_page,
        total_pages: page.total_pages,
        total_items: page.total_items,
        page_size: page.page_size,
        has_next: page.has_next,
        has_prev: page.has_prev,
        page_window: page_window(page.total_pages, page.current_page, window_size),
    }
}

fn apply_radius<'a>(
    matched: Vec<&'a Listing>,
    radius: f64,
    proximity: Option<Proximity<'_>>,
) -> Vec<&'a Listing> {
    let radius = match normalize_radius(radius) {
        Ok(radius) => radius,
        Err(error) => {
            tracing::warn!(%error, "ignoring radius filter");
            return matched;
        }
    };

    match proximity {
        Some(p) => filter_within_radius(matched, p.user, radius, p.table),
        None => {
            tracing::debug!(radius, "no user position; radius filter falls back to remote listings");
            remote_only(matched)
        }
    }
}
