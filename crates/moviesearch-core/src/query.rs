//! `SearchQuery` - validated user search input.

use std::fmt;

/// A trimmed, non-empty search string.
///
/// Only obtainable through [`SearchQuery::parse`], so holding one proves
/// the input is worth a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims `input`; returns `None` if nothing is left.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(String::from(trimmed)))
        }
    }

    /// Returns the query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_trims() {
        // Arrange & Act
        let query = SearchQuery::parse("  Fight Club \n").unwrap();

        // Assert
        assert_eq!(query.as_str(), "Fight Club");
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        for input in ["", " ", "\t", "\n\r ", "\u{3000}"] {
            assert!(SearchQuery::parse(input).is_none(), "input {input:?}");
        }
    }
}
