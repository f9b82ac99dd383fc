use opps_core::AppConfig;
use opps_search::{search_with_window, QueryParams, SortMode, SpecDefaults};

use crate::session::Session;
use crate::SourceArgs;

/// Run one search and print the result page as JSON on stdout.
///
/// # Errors
///
/// Returns an error if setup fails, the query parameters are invalid, or the
/// page cannot be serialized.
pub(crate) async fn run_search(
    config: &AppConfig,
    source: &SourceArgs,
    params: QueryParams,
) -> anyhow::Result<()> {
    let spec = params.into_spec(&SpecDefaults::from_app_config(config))?;
    let session = Session::open(config, source).await?;
    let proximity = session.proximity();

    if spec.sort_mode == SortMode::Nearby && proximity.is_none() {
        tracing::info!("nearby sort needs --lat/--lon; using default order");
    }

    let page = search_with_window(&session.listings, &spec, proximity, config.page_window);
    tracing::info!(
        total_items = page.total_items,
        page = page.current_page,
        total_pages = page.total_pages,
        "search finished"
    );
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
