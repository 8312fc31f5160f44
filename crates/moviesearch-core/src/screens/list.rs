//! Popular / search results screen.

use std::sync::Arc;

use moviesearch_api::tmdb::{MovieApi, ResultItem, ResultPage};

use super::{LIST_SPINNER, POPULAR_FAILED, SEARCH_FAILED, failure};
use crate::controller::{FetchController, FetchState, RequestToken, Resolution};
use crate::navigation::NavigationRequest;
use crate::query::SearchQuery;
use crate::view::{EmptyContext, View, select_view};

/// What the list currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMode {
    /// Popular movies.
    Popular,
    /// Results for a submitted query.
    Search(SearchQuery),
}

/// Home screen: search input plus one page of movies.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ListScreen<A> {
    api: Arc<A>,
    fetch: FetchController<ResultPage>,
    input: String,
    mode: ListMode,
    page: u32,
}

impl<A> ListScreen<A>
where
    A: MovieApi + Send + Sync + 'static,
{
    /// Creates the screen and issues `fetch_popular(1)`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn mount(api: Arc<A>) -> Self {
        let mut screen = Self {
            api,
            fetch: FetchController::new(),
            input: String::new(),
            mode: ListMode::Popular,
            page: 1,
        };
        screen.retry();
        screen
    }

    /// Returns the search input buffer.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the search input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Appends a character to the search input.
    pub fn push_input(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Removes the last character of the search input.
    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Clears the search input.
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Submits the input buffer as a search.
    ///
    /// A blank buffer issues nothing and leaves the screen unchanged.
    pub fn submit_search(&mut self) -> Option<RequestToken> {
        let Some(query) = SearchQuery::parse(&self.input) else {
            tracing::debug!("blank search input ignored");
            return None;
        };
        self.request(ListMode::Search(query), 1)
    }

    /// Switches back to popular movies, page 1.
    pub fn show_popular(&mut self) -> Option<RequestToken> {
        self.request(ListMode::Popular, 1)
    }

    /// Re-issues the last request.
    pub fn retry(&mut self) -> Option<RequestToken> {
        self.request(self.mode.clone(), self.page)
    }

    /// Loads page `page` of the current mode.
    ///
    /// Ignored unless `1 <= page <= total_pages` of the loaded page.
    pub fn go_to_page(&mut self, page: u32) -> Option<RequestToken> {
        let total = self.fetch.state().payload().map(|p| p.total_pages)?;
        if page == 0 || page > total {
            return None;
        }
        self.request(self.mode.clone(), page)
    }

    /// Loads the next page, if any.
    pub fn next_page(&mut self) -> Option<RequestToken> {
        self.go_to_page(self.page.checked_add(1)?)
    }

    /// Loads the previous page, if any.
    pub fn previous_page(&mut self) -> Option<RequestToken> {
        self.go_to_page(self.page.checked_sub(1)?)
    }

    /// Applies already-delivered responses. See [`FetchController::pump`].
    pub fn pump(&mut self) -> usize {
        self.fetch.pump()
    }

    /// Waits for the next response. See [`FetchController::settle`].
    #[allow(clippy::future_not_send)]
    pub async fn settle(&mut self) -> Option<Resolution> {
        self.fetch.settle().await
    }

    /// Returns the fetch state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<ResultPage> {
        self.fetch.state()
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> &ListMode {
        &self.mode
    }

    /// Returns the page number requested last.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the loaded items, empty unless the state is a success.
    #[must_use]
    pub fn items(&self) -> &[ResultItem] {
        self.fetch
            .state()
            .payload()
            .map(|p| p.items.as_slice())
            .unwrap_or_default()
    }

    /// `"Popular Movies"`, or `"Search Results (N)"` with N items shown.
    #[must_use]
    pub fn title(&self) -> String {
        match self.mode {
            ListMode::Popular => String::from("Popular Movies"),
            ListMode::Search(_) => format!("Search Results ({})", self.items().len()),
        }
    }

    /// Selects spinner, error, empty state or results.
    #[must_use]
    pub fn view(&self) -> View<'_, ResultPage> {
        let context = match self.mode {
            ListMode::Popular => EmptyContext::Popular,
            ListMode::Search(_) => EmptyContext::Search,
        };
        select_view(self.fetch.state(), context, LIST_SPINNER)
    }

    /// Navigation request for the item at `index`.
    #[must_use]
    pub fn select(&self, index: usize) -> Option<NavigationRequest> {
        self.items()
            .get(index)
            .map(|item| NavigationRequest::OpenDetail {
                id: item.id.to_string(),
            })
    }

    /// Stops applying responses. Further calls issue nothing.
    pub fn unmount(&mut self) {
        self.fetch.teardown();
    }

    /// Issues the request for `mode` and `page`; both are committed only
    /// once the request is issued.
    fn request(&mut self, mode: ListMode, page: u32) -> Option<RequestToken> {
        let api = Arc::clone(&self.api);
        let token = match mode.clone() {
            ListMode::Popular => {
                tracing::debug!(page, "requesting popular movies");
                self.fetch.issue(async move {
                    api.fetch_popular(page)
                        .await
                        .map_err(|e| failure(POPULAR_FAILED, &e))
                })
            }
            ListMode::Search(query) => {
                tracing::debug!(%query, page, "requesting search results");
                self.fetch.issue(async move {
                    api.search_by_query(query.as_str(), page)
                        .await
                        .map_err(|e| failure(SEARCH_FAILED, &e))
                })
            }
        }?;
        self.mode = mode;
        self.page = page;
        Some(token)
    }
}
