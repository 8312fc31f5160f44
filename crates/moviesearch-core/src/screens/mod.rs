//! List and detail screens.
//!
//! Each screen owns one [`FetchController`](crate::controller::FetchController)
//! and issues its requests through a shared [`MovieApi`](moviesearch_api::tmdb::MovieApi).

pub mod detail;
pub mod list;

#[cfg(test)]
pub(crate) mod mock;

use moviesearch_api::tmdb::ApiError;

pub use detail::DetailScreen;
pub use list::{ListMode, ListScreen};

/// Shown when the popular list fails to load.
pub const POPULAR_FAILED: &str = "Failed to load popular movies";
/// Shown when a search fails.
pub const SEARCH_FAILED: &str = "Search failed, please check your network connection";
/// Shown when the detail record fails to load.
pub const DETAIL_FAILED: &str = "Failed to load movie details";

/// Spinner text on the list screen.
pub const LIST_SPINNER: &str = "Loading...";
/// Spinner text on the detail screen.
pub const DETAIL_SPINNER: &str = "Loading movie details...";

/// Collapses an API error into its fixed user-facing message.
fn failure(message: &'static str, err: &ApiError) -> String {
    tracing::debug!(error = %err, status = ?err.status(), "{message}");
    String::from(message)
}
