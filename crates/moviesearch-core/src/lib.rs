//! Screen-level logic for moviesearch.
//!
//! Holds the per-screen [`FetchController`](controller::FetchController),
//! the list and detail screens built on it, and the pure view selection
//! and formatting used by the presentation layer.

/// Request lifecycle and stale-response suppression.
pub mod controller;
/// Display formatting policies.
pub mod format;
/// Navigation requests emitted by screens.
pub mod navigation;
/// View-models consumed by renderers.
pub mod present;
/// Validated search input.
pub mod query;
/// List and detail screens.
pub mod screens;
/// View selection from fetch state.
pub mod view;
