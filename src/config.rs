use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::database::index::MergePolicy;
use crate::parser::types::Language;
use crate::version::ordering::VersionOrdering;

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub report: ReportConfig,
}

/// Database construction settings
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseConfig {
    /// Ecosystem of the database when not given on the command line
    pub language: Option<Language>,
    pub merge_policy: MergePolicy,
    pub ordering: VersionOrdering,
}

/// Report settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    /// Emit a "library not yet tested" row for libraries missing from the database
    pub include_missing: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_missing: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit config file, else the default one if it exists, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = config_path();
        if default_path.is_file() {
            debug!("Loading config from {:?}", default_path);
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the path to the data directory for compat-lookup.
/// Uses $XDG_DATA_HOME/compat-lookup if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/compat-lookup,
/// or ./compat-lookup if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("compat-lookup.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("compat-lookup")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn app_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "database": {
                "ordering": "semantic"
            }
        }))
        .unwrap();

        assert_eq!(result.database.ordering, VersionOrdering::Semantic);
        assert_eq!(result.database.merge_policy, MergePolicy::LastWins);
        assert_eq!(result.database.language, None);
        assert_eq!(result.report, ReportConfig::default());
    }

    #[test]
    fn app_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "database": {
                "language": "ruby",
                "mergePolicy": "mergeNotes",
                "ordering": "lexicographic"
            },
            "report": {
                "includeMissing": false
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            AppConfig {
                database: DatabaseConfig {
                    language: Some(Language::Ruby),
                    merge_policy: MergePolicy::MergeNotes,
                    ordering: VersionOrdering::Lexicographic,
                },
                report: ReportConfig {
                    include_missing: false
                }
            }
        );
    }

    #[test]
    fn from_file_reads_json_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "database": {{ "mergePolicy": "reject" }} }}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.merge_policy, MergePolicy::Reject);
    }

    #[test]
    fn from_file_reports_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ database").unwrap();

        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Json { .. })));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::from_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_prefers_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "report": {{ "includeMissing": false }} }}"#).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(!config.report.include_missing);
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/compat-lookup"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/compat-lookup"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./compat-lookup"));
    }
}
