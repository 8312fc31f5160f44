//! Navigation requests emitted by screens.

/// A screen's request to change the current route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Push the detail screen for the given movie id (route parameter).
    OpenDetail {
        /// Movie id as a string route parameter.
        id: String,
    },
    /// Pop the current screen.
    Back,
}
