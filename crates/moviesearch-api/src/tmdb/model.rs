//! Domain model returned by the client.
//!
//! Wire `null`s are normalized here: optional strings become empty
//! strings so consumers only ever check for emptiness.

use super::error::ApiError;
use super::types::{TmdbMovie, TmdbMovieDetails, TmdbMoviePage, TmdbNamedEntry};

/// One page of movies. Replaced wholesale on each fetch, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    /// Page number (>= 1).
    pub page: u32,
    /// Movies in display order.
    pub items: Vec<ResultItem>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results across all pages.
    pub total_results: u64,
}

impl ResultPage {
    /// Returns `true` if the page holds no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if a page after this one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` if a page before this one exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// A movie as listed in popular/search results.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Overview text (may be empty).
    pub overview_text: String,
    /// ISO release date or empty.
    pub release_date: String,
    /// Average rating, 0.0 - 10.0.
    pub rating_average: f64,
    /// Number of votes.
    pub rating_count: u64,
    /// Relative poster path or empty.
    pub poster_ref: String,
    /// Relative backdrop path or empty.
    pub backdrop_ref: String,
    /// Original language (ISO 639-1), may be empty.
    pub original_language: String,
    /// Popularity score.
    pub popularity: f64,
}

/// Full movie record from the detail endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    /// Fields shared with list results.
    pub movie: ResultItem,
    /// Runtime in minutes, when known.
    pub runtime_minutes: Option<u32>,
    /// Budget in USD (0 when unknown).
    pub budget: u64,
    /// Revenue in USD (0 when unknown).
    pub revenue: u64,
    /// Genres in display order.
    pub genres: Vec<NamedRef>,
    /// Production companies in display order.
    pub production_companies: Vec<NamedRef>,
    /// Release status (e.g., "Released").
    pub status: String,
    /// Tagline (may be empty).
    pub tagline: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Homepage URL, if any.
    pub homepage: Option<String>,
    /// IMDb ID, if any.
    pub imdb_id: Option<String>,
}

/// `{id, name}` reference (genre, production company).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRef {
    /// Entry ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

impl TryFrom<TmdbMoviePage> for ResultPage {
    type Error = ApiError;

    fn try_from(raw: TmdbMoviePage) -> Result<Self, Self::Error> {
        if raw.page == 0 {
            return Err(ApiError::Decode(String::from(
                "page number must be at least 1",
            )));
        }
        Ok(Self {
            page: raw.page,
            items: raw.results.into_iter().map(ResultItem::from).collect(),
            total_pages: raw.total_pages,
            total_results: raw.total_results,
        })
    }
}

impl From<TmdbMovie> for ResultItem {
    fn from(raw: TmdbMovie) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            overview_text: raw.overview.unwrap_or_default(),
            release_date: raw.release_date.unwrap_or_default(),
            rating_average: raw.vote_average,
            rating_count: raw.vote_count,
            poster_ref: raw.poster_path.unwrap_or_default(),
            backdrop_ref: raw.backdrop_path.unwrap_or_default(),
            original_language: raw.original_language.unwrap_or_default(),
            popularity: raw.popularity,
        }
    }
}

impl From<TmdbNamedEntry> for NamedRef {
    fn from(raw: TmdbNamedEntry) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

impl From<TmdbMovieDetails> for DetailRecord {
    fn from(raw: TmdbMovieDetails) -> Self {
        let original_language = raw.original_language.unwrap_or_default();
        Self {
            movie: ResultItem {
                id: raw.id,
                title: raw.title,
                overview_text: raw.overview.unwrap_or_default(),
                release_date: raw.release_date.unwrap_or_default(),
                rating_average: raw.vote_average,
                rating_count: raw.vote_count,
                poster_ref: raw.poster_path.unwrap_or_default(),
                backdrop_ref: raw.backdrop_path.unwrap_or_default(),
                original_language: original_language.clone(),
                popularity: raw.popularity,
            },
            runtime_minutes: raw.runtime,
            budget: raw.budget,
            revenue: raw.revenue,
            genres: raw.genres.into_iter().map(NamedRef::from).collect(),
            production_companies: raw
                .production_companies
                .into_iter()
                .map(NamedRef::from)
                .collect(),
            status: raw.status.unwrap_or_default(),
            tagline: raw.tagline.unwrap_or_default(),
            original_language,
            homepage: raw.homepage.filter(|h| !h.is_empty()),
            imdb_id: raw.imdb_id.filter(|i| !i.is_empty()),
        }
    }
}
