//! Application configuration module.
//!
//! Reads the TOML config file holding the TMDB credential and endpoints,
//! and applies environment overrides on top of it.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, Settings};
pub use paths::resolve_config_path;
