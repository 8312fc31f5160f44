//! Movie detail screen.

use std::sync::Arc;

use moviesearch_api::tmdb::{ApiError, DetailRecord, MovieApi};

use super::{DETAIL_FAILED, DETAIL_SPINNER, failure};
use crate::controller::{FetchController, FetchState, RequestToken, Resolution};
use crate::navigation::NavigationRequest;
use crate::view::{EmptyContext, View, select_view};

/// Detail screen for one movie.
///
/// A successful fetch holds `Some(record)`; `None` means the movie does
/// not exist and renders the "Movie not found" empty state.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailScreen<A> {
    api: Arc<A>,
    fetch: FetchController<Option<DetailRecord>>,
    movie_id: Option<u64>,
}

impl<A> DetailScreen<A>
where
    A: MovieApi + Send + Sync + 'static,
{
    /// Creates the screen for the `id` route parameter and issues the fetch.
    ///
    /// A non-numeric id issues nothing and resolves to the not-found state.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn mount(api: Arc<A>, id_param: &str) -> Self {
        let movie_id = id_param.trim().parse::<u64>().ok();
        let mut screen = Self {
            api,
            fetch: FetchController::new(),
            movie_id,
        };
        if screen.movie_id.is_some() {
            screen.request();
        } else {
            tracing::debug!(id_param, "invalid movie id");
            if let Some(token) = screen.fetch.begin() {
                screen.fetch.resolve(token, Ok(None));
            }
        }
        screen
    }

    /// Returns the parsed movie id, `None` for an invalid route parameter.
    #[must_use]
    pub const fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }

    /// Re-issues the detail fetch.
    pub fn retry(&mut self) -> Option<RequestToken> {
        self.request()
    }

    /// Applies already-delivered responses.
    pub fn pump(&mut self) -> usize {
        self.fetch.pump()
    }

    /// Waits for the next response.
    #[allow(clippy::future_not_send)]
    pub async fn settle(&mut self) -> Option<Resolution> {
        self.fetch.settle().await
    }

    /// Returns the fetch state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<Option<DetailRecord>> {
        self.fetch.state()
    }

    /// Returns the loaded record.
    #[must_use]
    pub fn record(&self) -> Option<&DetailRecord> {
        self.fetch.state().payload().and_then(Option::as_ref)
    }

    /// The record title once loaded, otherwise `"Movie Details"`.
    #[must_use]
    pub fn title(&self) -> &str {
        self.record()
            .map_or("Movie Details", |record| record.movie.title.as_str())
    }

    /// Selects spinner, error, not-found state or the record.
    #[must_use]
    pub fn view(&self) -> View<'_, DetailRecord> {
        match select_view(self.fetch.state(), EmptyContext::Detail, DETAIL_SPINNER) {
            View::Content(Some(record)) => View::Content(record),
            View::Content(None) => View::Empty(EmptyContext::Detail.copy()),
            View::Spinner { text } => View::Spinner { text },
            View::Error { message } => View::Error { message },
            View::Empty(copy) => View::Empty(copy),
        }
    }

    /// Navigation request to leave the screen.
    #[must_use]
    pub const fn back(&self) -> NavigationRequest {
        NavigationRequest::Back
    }

    /// Stops applying responses.
    pub fn unmount(&mut self) {
        self.fetch.teardown();
    }

    fn request(&mut self) -> Option<RequestToken> {
        let id = self.movie_id?;
        let api = Arc::clone(&self.api);
        tracing::debug!(id, "requesting movie details");
        self.fetch.issue(async move {
            match api.fetch_detail(id).await {
                Ok(record) => Ok(Some(record)),
                Err(ApiError::NotFound) => {
                    tracing::debug!(id, "movie not found");
                    Ok(None)
                }
                Err(e) => Err(failure(DETAIL_FAILED, &e)),
            }
        })
    }
}
