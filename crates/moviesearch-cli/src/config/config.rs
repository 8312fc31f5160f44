//! `AppConfig` struct, TOML loading and environment overrides.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use moviesearch_api::tmdb::{
    CredentialKind, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE,
};
use serde::Deserialize;
use url::Url;

/// Overrides `tmdb.api_key`.
pub const ENV_API_KEY: &str = "MOVIESEARCH_TMDB_API_KEY";
/// Overrides `tmdb.base_url`.
pub const ENV_BASE_URL: &str = "MOVIESEARCH_TMDB_BASE_URL";
/// Overrides `tmdb.image_base_url`.
pub const ENV_IMAGE_BASE_URL: &str = "MOVIESEARCH_TMDB_IMAGE_BASE_URL";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB access settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// `[tmdb]` table. Every field is optional in the file.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API credential (v3 key, or v4 read token with `bearer = true`).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: Option<String>,
    /// Image base URL, size segment included.
    pub image_base_url: Option<String>,
    /// Response language.
    pub language: Option<String>,
    /// Per-request timeout in seconds. No timeout when absent.
    pub timeout_secs: Option<u64>,
    /// Send the credential as a bearer token instead of a query parameter.
    #[serde(default)]
    pub bearer: bool,
}

/// Fully resolved settings used to build the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// API credential.
    pub api_key: String,
    /// API base URL, always ending in `/`.
    pub base_url: Url,
    /// Image base URL.
    pub image_base_url: String,
    /// Response language.
    pub language: String,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// How the credential is attached.
    pub credential_kind: CredentialKind,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Applies environment overrides and defaults.
    ///
    /// `env` looks up a variable by name; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or a base URL is invalid.
    pub fn resolve(self, env: impl Fn(&str) -> Option<String>) -> Result<Settings> {
        let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let tmdb = self.tmdb;

        let Some(api_key) = lookup(ENV_API_KEY).or(tmdb.api_key.filter(|k| !k.trim().is_empty()))
        else {
            bail!("TMDB API key is not configured: set {ENV_API_KEY} or [tmdb].api_key");
        };

        let base_url = lookup(ENV_BASE_URL)
            .or(tmdb.base_url)
            .unwrap_or_else(|| String::from(DEFAULT_BASE_URL));
        let base_url = parse_base_url(&base_url)?;

        let image_base_url = lookup(ENV_IMAGE_BASE_URL)
            .or(tmdb.image_base_url)
            .unwrap_or_else(|| String::from(DEFAULT_IMAGE_BASE_URL));

        Ok(Settings {
            api_key,
            base_url,
            image_base_url,
            language: tmdb
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            timeout: tmdb.timeout_secs.map(Duration::from_secs),
            credential_kind: if tmdb.bearer {
                CredentialKind::Bearer
            } else {
                CredentialKind::ApiKey
            },
        })
    }
}

/// Parses a base URL, appending the trailing `/` that relative joins need.
fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        String::from(raw)
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).with_context(|| format!("invalid TMDB base URL: {raw}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_full_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[tmdb]
api_key = "abc123"
base_url = "http://localhost:8080/3"
image_base_url = "https://img.example/w300"
language = "ja-JP"
timeout_secs = 10
bearer = true
"#,
        )
        .unwrap();

        // Act
        let settings = AppConfig::load(&path).unwrap().resolve(no_env).unwrap();

        // Assert
        assert_eq!(settings.api_key, "abc123");
        assert_eq!(settings.base_url.as_str(), "http://localhost:8080/3/");
        assert_eq!(settings.image_base_url, "https://img.example/w300");
        assert_eq!(settings.language, "ja-JP");
        assert_eq!(settings.timeout, Some(Duration::from_secs(10)));
        assert_eq!(settings.credential_kind, CredentialKind::Bearer);
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\napi_key = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: Some(String::from("key")),
                ..TmdbConfig::default()
            },
        };

        // Act
        let settings = config.resolve(no_env).unwrap();

        // Assert
        assert_eq!(settings.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(settings.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(settings.language, "en-US");
        assert_eq!(settings.timeout, None);
        assert_eq!(settings.credential_kind, CredentialKind::ApiKey);
    }

    #[test]
    fn test_env_overrides_file() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: Some(String::from("from-file")),
                base_url: Some(String::from("https://file.example/3/")),
                ..TmdbConfig::default()
            },
        };
        let env = |name: &str| match name {
            ENV_API_KEY => Some(String::from("from-env")),
            ENV_BASE_URL => Some(String::from("http://127.0.0.1:9000")),
            ENV_IMAGE_BASE_URL => Some(String::from("http://127.0.0.1:9000/img")),
            _ => None,
        };

        // Act
        let settings = config.resolve(env).unwrap();

        // Assert
        assert_eq!(settings.api_key, "from-env");
        assert_eq!(settings.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(settings.image_base_url, "http://127.0.0.1:9000/img");
    }

    #[test]
    fn test_missing_api_key_is_error() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let err = config.resolve(no_env).unwrap_err();

        // Assert
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_blank_api_key_is_error() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: Some(String::from("  ")),
                ..TmdbConfig::default()
            },
        };

        // Act
        let result = config.resolve(|_| Some(String::new()));

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_base_url_is_error() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: Some(String::from("key")),
                base_url: Some(String::from("not a url")),
                ..TmdbConfig::default()
            },
        };

        // Act
        let result = config.resolve(no_env);

        // Assert
        assert!(result.is_err());
    }
}
