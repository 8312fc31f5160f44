//! Browser TUI state: the screen stack plus cursor and input mode.

use std::sync::Arc;

use moviesearch_api::tmdb::{ImageResolver, MovieApi};
use moviesearch_core::navigation::NavigationRequest;
use moviesearch_core::screens::{DetailScreen, ListScreen};
use ratatui::widgets::ListState;

/// Base URL of the public TMDB movie pages.
pub const TMDB_MOVIE_PAGE_URL: &str = "https://www.themoviedb.org/movie";

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Key presses are commands.
    Normal,
    /// Key presses edit the search input.
    Search,
}

/// State for the browser TUI.
///
/// The list screen is always mounted; the detail screen is pushed on top
/// of it and dropped again on back navigation.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState<A> {
    /// Shared API client.
    api: Arc<A>,
    /// Popular / search results screen.
    pub list: ListScreen<A>,
    /// Detail screen, when open.
    pub detail: Option<DetailScreen<A>>,
    /// Resolves poster and backdrop URLs.
    pub images: ImageResolver,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Selection in the result list.
    pub list_state: ListState,
    /// Vertical scroll offset of the detail pane.
    pub detail_scroll: u16,
}

impl<A> BrowserState<A>
where
    A: MovieApi + Send + Sync + 'static,
{
    /// Mounts the list screen, which starts loading popular movies.
    #[must_use]
    pub fn new(api: Arc<A>, images: ImageResolver) -> Self {
        let list = ListScreen::mount(Arc::clone(&api));
        Self {
            api,
            list,
            detail: None,
            images,
            input_mode: InputMode::Normal,
            list_state: ListState::default(),
            detail_scroll: 0,
        }
    }

    /// Applies delivered responses on every mounted screen.
    pub fn pump(&mut self) {
        if self.list.pump() > 0 {
            self.reset_cursor();
        }
        if let Some(detail) = self.detail.as_mut() {
            detail.pump();
        }
    }

    /// Returns the list cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Moves the list cursor up by one row.
    pub fn move_up(&mut self) {
        if self.detail.is_some() {
            self.detail_scroll = self.detail_scroll.saturating_sub(1);
            return;
        }
        if !self.list.items().is_empty() {
            self.list_state.select(Some(self.cursor().saturating_sub(1)));
        }
    }

    /// Moves the list cursor down by one row.
    pub fn move_down(&mut self) {
        if self.detail.is_some() {
            self.detail_scroll = self.detail_scroll.saturating_add(1);
            return;
        }
        let len = self.list.items().len();
        if len > 0 {
            let next = self.cursor().saturating_add(1).min(len.saturating_sub(1));
            self.list_state.select(Some(next));
        }
    }

    /// Opens the detail screen for the selected movie.
    pub fn open_selected(&mut self) {
        if let Some(request) = self.list.select(self.cursor()) {
            self.navigate(request);
        }
    }

    /// Leaves the detail screen.
    pub fn back(&mut self) {
        if let Some(detail) = self.detail.as_ref() {
            let request = detail.back();
            self.navigate(request);
        }
    }

    /// Applies a navigation request.
    pub fn navigate(&mut self, request: NavigationRequest) {
        match request {
            NavigationRequest::OpenDetail { id } => {
                tracing::debug!(%id, "opening detail screen");
                if let Some(mut previous) = self.detail.take() {
                    previous.unmount();
                }
                self.detail = Some(DetailScreen::mount(Arc::clone(&self.api), &id));
                self.detail_scroll = 0;
            }
            NavigationRequest::Back => {
                if let Some(mut detail) = self.detail.take() {
                    detail.unmount();
                }
            }
        }
    }

    /// Enters search input mode.
    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leaves search input mode without submitting.
    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Submits the search input and returns to normal mode.
    pub fn submit_search(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.list.submit_search().is_some() {
            self.reset_cursor();
        }
    }

    /// Shows popular movies again.
    pub fn show_popular(&mut self) {
        self.list.clear_input();
        if self.list.show_popular().is_some() {
            self.reset_cursor();
        }
    }

    /// Retries the request of the visible screen.
    pub fn retry(&mut self) {
        if let Some(detail) = self.detail.as_mut() {
            detail.retry();
        } else {
            self.list.retry();
        }
    }

    /// Loads the next result page.
    pub fn next_page(&mut self) {
        if self.detail.is_none() && self.list.next_page().is_some() {
            self.reset_cursor();
        }
    }

    /// Loads the previous result page.
    pub fn previous_page(&mut self) {
        if self.detail.is_none() && self.list.previous_page().is_some() {
            self.reset_cursor();
        }
    }

    /// TMDB web page of the detail movie or, on the list, the selected one.
    #[must_use]
    pub fn tmdb_page_url(&self) -> Option<String> {
        let id = match self.detail.as_ref() {
            Some(detail) => detail.movie_id()?,
            None => self.list.items().get(self.cursor())?.id,
        };
        Some(format!("{TMDB_MOVIE_PAGE_URL}/{id}"))
    }

    /// Tears down every mounted screen.
    pub fn shutdown(&mut self) {
        self.navigate(NavigationRequest::Back);
        self.list.unmount();
    }

    fn reset_cursor(&mut self) {
        let selection = (!self.list.items().is_empty()).then_some(0);
        self.list_state.select(selection);
    }
}
