//! Configuration module for Bing-Reader
//!
//! Handles loading settings from YAML files, `~/.env` and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load `~/.env` into the process environment, if present
pub fn load_dotenv() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let path = home.join(".env");
    if dotenvy::from_path(&path).is_ok() {
        debug!("Loaded environment from {}", path.display());
    }
}

/// Load settings from an explicit path, the search path, or defaults
///
/// Environment overrides are merged last.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    load_dotenv();

    let mut settings = match find_settings_file(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env();
    Ok(settings)
}

fn find_settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("BING_READER_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("bing-reader/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/nonexistent/bing-reader.yml");
        assert_eq!(find_settings_file(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(load(Some(Path::new("/nonexistent/bing-reader.yml"))).is_err());
    }
}
