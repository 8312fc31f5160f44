//! Image reference resolution.

/// Default base URL for poster/backdrop images.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Resolves relative image paths against a configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    /// Base URL prepended to every non-empty reference.
    base_url: String,
}

impl ImageResolver {
    /// Creates a resolver for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves an image reference. An empty reference means "no image".
    #[must_use]
    pub fn resolve(&self, image_ref: &str) -> String {
        if image_ref.is_empty() {
            String::new()
        } else {
            format!("{}{image_ref}", self.base_url)
        }
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}
