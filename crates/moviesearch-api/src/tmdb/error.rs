//! `ApiError` - failure taxonomy of the TMDB client.

use thiserror::Error;

/// Errors surfaced by [`MovieApi`](super::MovieApi) operations.
///
/// The client never recovers from these; callers decide what to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// The request could not be completed at all (DNS, connection reset, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A response was received but its status indicates failure.
    #[error("TMDB API error (HTTP {status}){}", message_suffix(.message))]
    Http {
        /// HTTP status code.
        status: u16,
        /// `status_message` from the TMDB error body, when present.
        message: Option<String>,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The requested record does not exist (detail lookups only).
    #[error("resource not found")]
    NotFound,

    /// The request could not be built from the given inputs.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Formats the optional remote message as a `": ..."` suffix.
fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map_or_else(String::new, |m| format!(": {m}"))
}

impl ApiError {
    /// Returns the HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::NotFound => Some(404),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_with_message() {
        // Arrange
        let err = ApiError::Http {
            status: 401,
            message: Some(String::from("Invalid API key")),
        };

        // Act
        let text = err.to_string();

        // Assert
        assert_eq!(text, "TMDB API error (HTTP 401): Invalid API key");
    }

    #[test]
    fn test_http_error_display_without_message() {
        // Arrange
        let err = ApiError::Http {
            status: 502,
            message: None,
        };

        // Act & Assert
        assert_eq!(err.to_string(), "TMDB API error (HTTP 502)");
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(ApiError::NotFound.status(), Some(404));
        assert_eq!(
            ApiError::Http {
                status: 500,
                message: None
            }
            .status(),
            Some(500)
        );
        assert_eq!(ApiError::Network(String::from("reset")).status(), None);
    }
}
