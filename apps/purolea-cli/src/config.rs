//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable               | Default                                  |
//! |------------------------|------------------------------------------|
//! | `PUROLEA_DB_PATH`      | `purolea.db` in the platform data dir    |
//! | `PUROLEA_CREATED_BY`   | unset (quotes saved without an author)   |
//! | `PUROLEA_COMPANY_NAME` | `Purolea`                                |
//! | `PUROLEA_PAGE_LINES`   | `54`                                     |

use directories::ProjectDirs;
use purolea_core::document::TextExporter;
use purolea_db::DbConfig;
use std::env;
use std::path::PathBuf;

const DEFAULT_COMPANY_NAME: &str = "Purolea";
const DB_FILE_NAME: &str = "purolea.db";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Recorded on saved quotes
    pub created_by: Option<String>,

    /// Issuer shown on exported documents
    pub company_name: String,

    /// Lines per page for text export
    pub page_lines: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let page_lines = match non_blank("PUROLEA_PAGE_LINES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue("PUROLEA_PAGE_LINES".to_string()))?,
            None => TextExporter::DEFAULT_PAGE_LINES,
        };
        if page_lines < TextExporter::MIN_PAGE_LINES {
            return Err(ConfigError::TooSmall {
                key: "PUROLEA_PAGE_LINES".to_string(),
                min: TextExporter::MIN_PAGE_LINES,
            });
        }

        Ok(AppConfig {
            db_path: non_blank("PUROLEA_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            created_by: non_blank("PUROLEA_CREATED_BY").map(|v| v.trim().to_string()),
            company_name: non_blank("PUROLEA_COMPANY_NAME")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
            page_lines,
        })
    }

    /// Replaces the database path when a flag was given.
    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.db_path = path;
        }
        self
    }

    /// Pool configuration for the database file.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path)
    }
}

/// Determines the default database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.purolea.quote/purolea.db`
/// - **Windows**: `%APPDATA%\purolea\quote\data\purolea.db`
/// - **Linux**: `~/.local/share/quote/purolea.db`
///
/// Falls back to the working directory when no home directory is known.
fn default_db_path() -> PathBuf {
    ProjectDirs::from("com", "purolea", "quote")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("{key} must be at least {min}")]
    TooSmall { key: String, min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.company_name, "Purolea");
        assert_eq!(config.page_lines, 54);
        assert_eq!(config.created_by, None);
        assert!(config.db_path.ends_with("purolea.db"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PUROLEA_DB_PATH", "/tmp/q.db"),
            ("PUROLEA_CREATED_BY", " ops@purolea.com "),
            ("PUROLEA_COMPANY_NAME", "Acme Labs"),
            ("PUROLEA_PAGE_LINES", "40"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/q.db"));
        assert_eq!(config.created_by.as_deref(), Some("ops@purolea.com"));
        assert_eq!(config.company_name, "Acme Labs");
        assert_eq!(config.page_lines, 40);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("PUROLEA_COMPANY_NAME", "  "), ("PUROLEA_CREATED_BY", "")]).unwrap();
        assert_eq!(config.company_name, "Purolea");
        assert_eq!(config.created_by, None);
    }

    #[test]
    fn test_bad_page_lines() {
        assert!(matches!(
            load(&[("PUROLEA_PAGE_LINES", "many")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            load(&[("PUROLEA_PAGE_LINES", "5")]),
            Err(ConfigError::TooSmall { min: 12, .. })
        ));
    }

    #[test]
    fn test_flag_overrides_db_path() {
        let config = load(&[("PUROLEA_DB_PATH", "/tmp/env.db")])
            .unwrap()
            .with_db_path(Some(PathBuf::from("/tmp/flag.db")));
        assert_eq!(config.db_path, PathBuf::from("/tmp/flag.db"));

        let config = config.with_db_path(None);
        assert_eq!(config.db_path, PathBuf::from("/tmp/flag.db"));
    }
}
