//! Runtime configuration.

use std::path::PathBuf;

use crate::logging::default_log_level;

/// Environment variable naming the SQLite database file.
pub const ENV_DB_PATH: &str = "CLINIC_DB_PATH";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "CLINIC_LOG_LEVEL";
/// Environment variable naming a directory for rotating log files.
pub const ENV_LOG_DIR: &str = "CLINIC_LOG_DIR";

/// Settings for opening the records core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicConfig {
    /// Database file; `None` keeps everything in memory
    pub database_path: Option<PathBuf>,
    pub log_level: String,
    /// Rotating log directory; `None` logs to stderr
    pub log_dir: Option<PathBuf>,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ClinicConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            database_path: get(ENV_DB_PATH).map(PathBuf::from),
            log_level: get(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClinicConfig::from_lookup(|_| None);
        assert_eq!(config, ClinicConfig::default());
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        let expected = ClinicConfig::from_lookup(|key| std::env::var(key).ok());
        assert_eq!(ClinicConfig::from_env(), expected);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_DB_PATH, "/var/lib/clinic/records.sqlite3"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "   "),
        ]
        .into_iter()
        .collect();

        let config = ClinicConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/var/lib/clinic/records.sqlite3"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
        assert!(!config.is_in_memory());
    }
}
