//! View-models built from domain records.
//!
//! Renderers only see pre-formatted strings; every formatting rule lives
//! in [`format`](crate::format).

use moviesearch_api::tmdb::{DetailRecord, ImageResolver, ResultItem};

use crate::format::{format_currency, format_rating, format_runtime, format_vote_count, format_year};

/// One movie in a result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// Movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Release year or "Unknown year".
    pub year: String,
    /// One-decimal rating.
    pub rating: String,
    /// `"{n} votes"`.
    pub votes: String,
    /// Overview text, possibly empty.
    pub overview: String,
    /// Absolute poster URL, empty when there is none.
    pub poster_url: String,
    /// Backdrop URL, or the poster URL when there is no backdrop.
    pub hero_url: String,
}

impl MovieCard {
    /// Builds a card from a list item.
    #[must_use]
    pub fn new(item: &ResultItem, images: &ImageResolver) -> Self {
        let poster_url = images.resolve(&item.poster_ref);
        let backdrop_url = images.resolve(&item.backdrop_ref);
        let hero_url = if backdrop_url.is_empty() {
            poster_url.clone()
        } else {
            backdrop_url
        };
        Self {
            id: item.id,
            title: item.title.clone(),
            year: format_year(&item.release_date),
            rating: format_rating(item.rating_average),
            votes: format_vote_count(item.rating_count),
            overview: item.overview_text.clone(),
            poster_url,
            hero_url,
        }
    }
}

/// Labelled value in the production info section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    /// Label, e.g. "Status".
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
}

/// Everything the detail screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Header fields shared with list cards.
    pub header: MovieCard,
    /// `"{n} minutes"` when known.
    pub runtime: Option<String>,
    /// Genre names in order.
    pub genres: Vec<String>,
    /// Overview, hidden when empty.
    pub overview: Option<String>,
    /// Tagline, hidden when empty.
    pub tagline: Option<String>,
    /// Status, language, and budget/revenue when > 0.
    pub production_info: Vec<InfoRow>,
    /// Production company names in order.
    pub companies: Vec<String>,
    /// Homepage URL, if any.
    pub homepage: Option<String>,
}

impl DetailView {
    /// Builds the detail view-model.
    #[must_use]
    pub fn new(record: &DetailRecord, images: &ImageResolver) -> Self {
        let mut production_info = vec![
            InfoRow {
                label: "Status",
                value: record.status.clone(),
            },
            InfoRow {
                label: "Language",
                value: record.original_language.clone(),
            },
        ];
        if let Some(budget) = format_currency(record.budget) {
            production_info.push(InfoRow {
                label: "Budget",
                value: budget,
            });
        }
        if let Some(revenue) = format_currency(record.revenue) {
            production_info.push(InfoRow {
                label: "Revenue",
                value: revenue,
            });
        }

        Self {
            header: MovieCard::new(&record.movie, images),
            runtime: format_runtime(record.runtime_minutes),
            genres: record.genres.iter().map(|g| g.name.clone()).collect(),
            overview: non_empty(&record.movie.overview_text),
            tagline: non_empty(&record.tagline),
            production_info,
            companies: record
                .production_companies
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            homepage: record.homepage.clone(),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| String::from(text))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]

    use moviesearch_api::tmdb::NamedRef;

    use super::*;

    fn item() -> ResultItem {
        ResultItem {
            id: 550,
            title: String::from("Fight Club"),
            overview_text: String::from("A ticking-time-bomb insomniac..."),
            release_date: String::from("1999-10-15"),
            rating_average: 8.433,
            rating_count: 26_280,
            poster_ref: String::from("/poster.jpg"),
            backdrop_ref: String::from("/backdrop.jpg"),
            original_language: String::from("en"),
            popularity: 61.416,
        }
    }

    fn record() -> DetailRecord {
        DetailRecord {
            movie: item(),
            runtime_minutes: Some(139),
            budget: 63_000_000,
            revenue: 0,
            genres: vec![
                NamedRef {
                    id: 18,
                    name: String::from("Drama"),
                },
                NamedRef {
                    id: 53,
                    name: String::from("Thriller"),
                },
            ],
            production_companies: vec![NamedRef {
                id: 508,
                name: String::from("Regency Enterprises"),
            }],
            status: String::from("Released"),
            tagline: String::new(),
            original_language: String::from("en"),
            homepage: None,
            imdb_id: Some(String::from("tt0137523")),
        }
    }

    #[test]
    fn test_movie_card_formats_fields() {
        // Arrange
        let images = ImageResolver::new("https://img/w500");

        // Act
        let card = MovieCard::new(&item(), &images);

        // Assert
        assert_eq!(card.year, "1999");
        assert_eq!(card.rating, "8.4");
        assert_eq!(card.votes, "26280 votes");
        assert_eq!(card.poster_url, "https://img/w500/poster.jpg");
        assert_eq!(card.hero_url, "https://img/w500/backdrop.jpg");
    }

    #[test]
    fn test_movie_card_hero_falls_back_to_poster() {
        // Arrange
        let mut movie = item();
        movie.backdrop_ref.clear();
        movie.release_date.clear();

        // Act
        let card = MovieCard::new(&movie, &ImageResolver::new("https://img/w500"));

        // Assert
        assert_eq!(card.hero_url, "https://img/w500/poster.jpg");
        assert_eq!(card.year, "Unknown year");
    }

    #[test]
    fn test_detail_view_hides_zero_revenue_and_empty_tagline() {
        // Arrange & Act
        let view = DetailView::new(&record(), &ImageResolver::default());

        // Assert
        let labels: Vec<_> = view.production_info.iter().map(|r| r.label).collect();
        assert_eq!(labels, ["Status", "Language", "Budget"]);
        assert_eq!(view.production_info[2].value, "$63,000,000");
        assert_eq!(view.tagline, None);
        assert_eq!(view.runtime.as_deref(), Some("139 minutes"));
        assert_eq!(view.genres, ["Drama", "Thriller"]);
        assert_eq!(view.companies, ["Regency Enterprises"]);
    }
}
