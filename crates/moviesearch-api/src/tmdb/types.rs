//! TMDB API response types (wire shape).
//!
//! These mirror the JSON bodies returned by TMDB v3 and are converted
//! into the domain model in `model.rs` before leaving the client.

use serde::Deserialize;

// --- Movie lists (popular / search) ---

/// Paginated envelope returned by `movie/popular` and `search/movie`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMoviePage {
    /// Current page number.
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<TmdbMovie>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u64,
}

/// A single movie entry within a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, empty or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u64,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
}

// --- Movie Details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u64,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Budget in USD.
    #[serde(default)]
    pub budget: u64,
    /// Revenue in USD.
    #[serde(default)]
    pub revenue: u64,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbNamedEntry>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<TmdbNamedEntry>,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,
    /// IMDb ID.
    #[serde(default)]
    pub imdb_id: Option<String>,
}

/// `{id, name}` entry used for genres and production companies.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbNamedEntry {
    /// Entry ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
}
