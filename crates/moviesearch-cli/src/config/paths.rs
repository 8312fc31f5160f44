//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Overrides the config directory when `--dir` is absent.
pub const ENV_CONFIG_DIR: &str = "MOVIESEARCH_CONFIG_DIR";
/// Directory name under the XDG config home.
const APP_DIR: &str = "moviesearch";
/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Directory precedence:
/// 1. `dir` (the `--dir` flag)
/// 2. `$MOVIESEARCH_CONFIG_DIR`
/// 3. `$XDG_CONFIG_HOME/moviesearch`, ignored unless absolute
/// 4. `$HOME/.config/moviesearch`
///
/// Blank variables count as unset.
///
/// # Errors
///
/// Returns an error if no candidate directory applies.
pub fn resolve_config_path(
    dir: Option<&PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    let var = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    let base = if let Some(d) = dir {
        d.clone()
    } else if let Some(d) = var(ENV_CONFIG_DIR) {
        PathBuf::from(d)
    } else if let Some(xdg) = var("XDG_CONFIG_HOME").filter(|v| Path::new(v).is_absolute()) {
        PathBuf::from(xdg).join(APP_DIR)
    } else if let Some(home) = var("HOME") {
        PathBuf::from(home).join(".config").join(APP_DIR)
    } else {
        bail!("cannot locate config directory: set {ENV_CONFIG_DIR}, XDG_CONFIG_HOME or HOME");
    };
    Ok(base.join(CONFIG_FILE))
}
