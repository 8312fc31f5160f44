//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::ApiError;
use super::model::{DetailRecord, ResultPage};

/// Movie metadata API trait.
///
/// Abstracts the three remote operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait so
/// fetches can be spawned onto the runtime.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Lists popular movies.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Http` or `Decode` on failure.
    async fn fetch_popular(&self, page: u32) -> Result<ResultPage, ApiError>;

    /// Searches movies by title.
    ///
    /// `query` must be non-empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an empty query, otherwise `Network`,
    /// `Http` or `Decode` on failure.
    async fn search_by_query(&self, query: &str, page: u32) -> Result<ResultPage, ApiError>;

    /// Fetches the full record of a single movie.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the movie does not exist, otherwise
    /// `Network`, `Http` or `Decode` on failure.
    async fn fetch_detail(&self, id: u64) -> Result<DetailRecord, ApiError>;
}
