//! Filtering, ranking and pagination of listings.
//!
//! Everything here is synchronous and pure; callers re-run [`search`] whenever
//! an input changes.

pub mod error;
pub mod paginate;
pub mod predicate;
pub mod query;
pub mod rank;
pub mod search;

pub use error::SearchError;
pub use paginate::{page_window, paginate, Page, DEFAULT_WINDOW_SIZE};
pub use predicate::build_predicate;
pub use query::{QueryParams, QuerySpec, SortMode, SpecDefaults, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use rank::{rank, Proximity};
pub use search::{search, search_with_window, ResultPage};
