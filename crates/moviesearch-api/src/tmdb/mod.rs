//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints and
//! decodes them into the domain model used by the screens.

mod api;
mod client;
mod error;
mod http;
mod image;
mod model;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{
    CredentialKind, DEFAULT_BASE_URL, DEFAULT_LANGUAGE, MOVIES_PER_PAGE, TmdbClient,
    TmdbClientBuilder,
};
pub use error::ApiError;
pub use http::{HttpAdapter, RawResponse, RequestOptions};
pub use image::{DEFAULT_IMAGE_BASE_URL, ImageResolver};
pub use model::{DetailRecord, NamedRef, ResultItem, ResultPage};
