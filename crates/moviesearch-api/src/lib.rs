//! API client library for moviesearch.
//!
//! Provides a client for the TMDB movie endpoints used by the search
//! and detail screens.

/// TMDB API client.
pub mod tmdb;
