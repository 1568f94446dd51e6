//! Per-store configuration, persisted as TOML in `.gitdo/config.toml`.
//!
//! The config file is optional: a store without one behaves exactly like a
//! store with the defaults written out.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from config file operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(gitdo::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(gitdo::config::parse),
        help("Check the TOML syntax in the store config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(gitdo::config::write),
        help("Ensure you have write permissions to the .gitdo/ directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Fixed name of the config file inside the store directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Store-level settings consumed by the CLI shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Id-prefix column width in listings.
    #[serde(default = "default_id_width")]
    pub id_width: usize,
    /// What `list` shows with no flags: "open" or "all".
    #[serde(default = "default_view")]
    pub default_view: String,
}

fn default_id_width() -> usize {
    8
}
fn default_view() -> String {
    "open".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_width: default_id_width(),
            default_view: default_view(),
        }
    }
}

impl StoreConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file, falling back to defaults when it is absent.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// True when unflagged `list` should show every task.
    pub fn shows_all_by_default(&self) -> bool {
        self.default_view.eq_ignore_ascii_case("all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.id_width, 8);
        assert_eq!(cfg.default_view, "open");
        assert!(!cfg.shows_all_by_default());
    }

    #[test]
    fn config_roundtrip_toml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let cfg = StoreConfig {
            id_width: 12,
            default_view: "all".into(),
        };
        cfg.save(&path).unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(loaded.id_width, 12);
        assert!(loaded.shows_all_by_default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = StoreConfig::load_or_default(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.id_width, 8);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "id_width = 6\n").unwrap();

        let cfg = StoreConfig::load(&path).unwrap();
        assert_eq!(cfg.id_width, 6);
        assert_eq!(cfg.default_view, "open");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "id_width = [broken").unwrap();

        assert!(matches!(
            StoreConfig::load(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
