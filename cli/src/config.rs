//! Settings file loading.
//!
//! Reads `~/.portguard/config.json` unless another path is given. Missing
//! default file means defaults; the file is never written.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use portguard_core::Settings;
use tokio::fs;
use tracing::debug;

/// The default settings path (~/.portguard/config.json).
fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".portguard").join("config.json"))
}

/// Load settings from `explicit`, or from the default path when it exists.
pub async fn load(explicit: Option<&Path>) -> Result<Settings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No settings file, using defaults");
                return Ok(Settings::default());
            }
        },
    };
    read(&path).await
}

async fn read(path: &Path) -> Result<Settings> {
    debug!(path = %path.display(), "Loading settings");
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}
