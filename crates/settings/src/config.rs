//! Tool configuration.
//!
//! Stored as TOML:
//! - Linux: `~/.config/romshelf/romshelf.toml`
//! - Windows: `%APPDATA%/romshelf/romshelf.toml`
//!
//! `ROMSHELF_CONFIG` points at a different file. A missing file means
//! defaults; it is never created on disk.
//!
//! A `.env` file next to the executables may carry `STEAMGRIDDB_API_KEY`.
//! Precedence: process environment, then `.env`, then the TOML file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logging::LOG_FILE_NAME;
use crate::paths;

/// Environment variable holding the SteamGridDB API key.
pub const API_KEY_ENV: &str = "STEAMGRIDDB_API_KEY";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "ROMSHELF_CONFIG";

/// Name of the dotenv file read from the install directory.
pub const DOTENV_FILE_NAME: &str = ".env";

/// Value shipped in sample configs; treated as "no key".
const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Errors from loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// SteamGridDB API key. Without one, icon lookup is skipped.
    #[serde(default)]
    pub steamgriddb_api_key: Option<String>,

    /// Alternative SteamGridDB API root.
    #[serde(default)]
    pub steamgriddb_base_url: Option<String>,

    /// Where downloaded icons go (default `<install>/media/icon`).
    #[serde(default)]
    pub icon_cache_dir: Option<PathBuf>,

    /// Directory of the log file (default: next to the executable).
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from the default location and applies environment overrides.
    pub fn load() -> Result<Self, SettingsError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);
        let dotenv = read_dotenv(&paths::install_dir().join(DOTENV_FILE_NAME));
        let settings = Self::load_from(&path)?
            .with_env(|key| dotenv.get(key).cloned())
            .with_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Loads settings from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(settings)
    }

    /// Applies overrides from an environment lookup.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.steamgriddb_api_key = Some(key);
        }
        self
    }

    /// Returns the usable API key, ignoring blanks and the sample placeholder.
    pub fn api_key(&self) -> Option<&str> {
        self.steamgriddb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != API_KEY_PLACEHOLDER)
    }

    /// Returns the icon cache directory.
    pub fn icon_cache_dir(&self) -> PathBuf {
        self.icon_cache_dir
            .clone()
            .unwrap_or_else(|| paths::install_dir().join("media").join("icon"))
    }

    /// Returns the full path of the shared log file.
    pub fn log_file(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(paths::install_dir)
            .join(LOG_FILE_NAME)
    }
}

/// Reads `KEY=value` pairs from a dotenv file without touching the process
/// environment. A missing file yields nothing; malformed lines are skipped.
pub fn read_dotenv(path: &Path) -> HashMap<String, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return HashMap::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read dotenv file");
            return HashMap::new();
        }
    };

    iter.filter_map(|item| match item {
        Ok(pair) => Some(pair),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping dotenv line");
            None
        }
    })
    .collect()
}

/// Returns the platform-specific configuration file path.
fn default_config_path() -> PathBuf {
    paths::user_config_dir()
        .join("romshelf")
        .join("romshelf.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert!(settings.api_key().is_none());
        assert!(settings.icon_cache_dir().ends_with("media/icon"));
        assert!(settings.log_file().ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!tmp.path().join("nope.toml").exists());
    }

    #[test]
    fn partial_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("romshelf.toml");
        std::fs::write(&path, "icon_cache_dir = \"/srv/icons\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.icon_cache_dir(), PathBuf::from("/srv/icons"));
        assert!(settings.steamgriddb_api_key.is_none());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("romshelf.toml");
        std::fs::write(&path, "icon_cache_dir = [").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn env_key_overrides_file() {
        let settings = Settings {
            steamgriddb_api_key: Some("from-file".into()),
            ..Settings::default()
        }
        .with_env(|key| (key == API_KEY_ENV).then(|| "from-env".to_string()));
        assert_eq!(settings.api_key(), Some("from-env"));
    }

    #[test]
    fn env_without_key_keeps_file_value() {
        let settings = Settings {
            steamgriddb_api_key: Some("from-file".into()),
            ..Settings::default()
        }
        .with_env(|_| None);
        assert_eq!(settings.api_key(), Some("from-file"));
    }

    #[test]
    fn dotenv_key_is_picked_up() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(DOTENV_FILE_NAME);
        std::fs::write(&path, "# front end secrets\nSTEAMGRIDDB_API_KEY=from-dotenv\nOTHER=1\n")
            .unwrap();

        let dotenv = read_dotenv(&path);
        let settings = Settings::default()
            .with_env(|key| dotenv.get(key).cloned())
            .with_env(|_| None);
        assert_eq!(settings.api_key(), Some("from-dotenv"));
    }

    #[test]
    fn process_env_beats_dotenv() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(DOTENV_FILE_NAME);
        std::fs::write(&path, "STEAMGRIDDB_API_KEY=\"from-dotenv\"\n").unwrap();

        let dotenv = read_dotenv(&path);
        let settings = Settings {
            steamgriddb_api_key: Some("from-file".into()),
            ..Settings::default()
        }
        .with_env(|key| dotenv.get(key).cloned())
        .with_env(|key| (key == API_KEY_ENV).then(|| "from-process".to_string()));
        assert_eq!(settings.api_key(), Some("from-process"));
    }

    #[test]
    fn missing_dotenv_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(read_dotenv(&tmp.path().join(DOTENV_FILE_NAME)).is_empty());
    }

    #[test]
    fn placeholder_and_blank_keys_are_unset() {
        for key in ["YOUR_API_KEY_HERE", "", "   "] {
            let settings = Settings {
                steamgriddb_api_key: Some(key.into()),
                ..Settings::default()
            };
            assert!(settings.api_key().is_none(), "{key:?} should be unset");
        }
    }

    #[test]
    fn log_dir_override() {
        let settings = Settings {
            log_dir: Some(PathBuf::from("/var/log/romshelf")),
            ..Settings::default()
        };
        assert_eq!(
            settings.log_file(),
            PathBuf::from("/var/log/romshelf").join(LOG_FILE_NAME)
        );
    }
}
