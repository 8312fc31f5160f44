//! Derived view selection.
//!
//! Maps a [`FetchState`] to what a screen should render. Pure; holds no
//! state of its own.

use moviesearch_api::tmdb::ResultPage;

use crate::controller::FetchState;

/// Payloads that can be "successfully empty".
pub trait FetchPayload {
    /// Returns `true` if the payload carries nothing to show.
    fn is_empty_payload(&self) -> bool;
}

impl FetchPayload for ResultPage {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> FetchPayload for Option<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_none()
    }
}

/// Where an empty state is shown; selects its copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyContext {
    /// Popular movies list.
    Popular,
    /// Search results list.
    Search,
    /// Movie detail screen.
    Detail,
}

/// Text of an empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyStateCopy {
    /// Headline.
    pub title: &'static str,
    /// Hint below the headline.
    pub message: &'static str,
    /// Decorative glyph.
    pub icon: &'static str,
}

impl EmptyContext {
    /// Returns the empty-state copy for this context.
    #[must_use]
    pub const fn copy(self) -> EmptyStateCopy {
        match self {
            Self::Popular => EmptyStateCopy {
                title: "No movie data",
                message: "Please try again later",
                icon: "🎬",
            },
            Self::Search => EmptyStateCopy {
                title: "No movies found",
                message: "Try searching with different keywords",
                icon: "🔍",
            },
            Self::Detail => EmptyStateCopy {
                title: "Movie not found",
                message: "Please go back and search again",
                icon: "😔",
            },
        }
    }
}

/// What a screen renders for its current fetch state.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a, T> {
    /// Request in flight.
    Spinner {
        /// Text under the spinner.
        text: &'static str,
    },
    /// Current request failed.
    Error {
        /// User-facing message.
        message: &'a str,
    },
    /// Nothing to show.
    Empty(EmptyStateCopy),
    /// Payload to render.
    Content(&'a T),
}

/// Selects the view for `state`.
///
/// `Idle` renders as the empty state, same as an empty success.
#[must_use]
pub fn select_view<'a, T: FetchPayload>(
    state: &'a FetchState<T>,
    context: EmptyContext,
    spinner_text: &'static str,
) -> View<'a, T> {
    match state {
        FetchState::Loading => View::Spinner { text: spinner_text },
        FetchState::Failed(message) => View::Error {
            message: message.as_str(),
        },
        FetchState::Success(payload) if !payload.is_empty_payload() => View::Content(payload),
        FetchState::Idle | FetchState::Success(_) => View::Empty(context.copy()),
    }
}
