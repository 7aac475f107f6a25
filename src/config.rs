//! Configuration management for daylog

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::{
    Destinations, LevelPolicy, LogLevel, PruneScope, DEFAULT_LOG_DIR, DEFAULT_RETAIN_DAYS,
};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "daylog.toml";

/// Per-level overrides of the default destination table
///
/// Each present entry replaces the whole row for that level; a missing
/// `file` or `console` key inside an entry means `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<Destinations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Destinations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn: Option<Destinations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Destinations>,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory holding the daily `yyyy-MM-dd.log` files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Directory used when `directory` cannot be created (default: ./logs)
    #[serde(default = "default_directory")]
    pub fallback_directory: PathBuf,

    /// Number of most recent daily files kept when pruning at startup (default: 7)
    #[serde(default = "default_retain_days")]
    pub retain_days: usize,

    /// Which files pruning may delete: "dated-logs" (default) or "all-files"
    #[serde(default)]
    pub prune_scope: PruneScope,

    /// Destination overrides, e.g. `[levels.debug] file = true, console = true`
    #[serde(default)]
    pub levels: LevelOverrides,
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

fn default_retain_days() -> usize {
    DEFAULT_RETAIN_DAYS
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            fallback_directory: default_directory(),
            retain_days: default_retain_days(),
            prune_scope: PruneScope::default(),
            levels: LevelOverrides::default(),
        }
    }
}

impl LoggerConfig {
    /// Load configuration from file, or return default if not found
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// The default level policy with this config's overrides applied
    pub fn level_policy(&self) -> LevelPolicy {
        let overrides = [
            (LogLevel::Debug, self.levels.debug),
            (LogLevel::Info, self.levels.info),
            (LogLevel::Warn, self.levels.warn),
            (LogLevel::Error, self.levels.error),
        ];

        let mut policy = LevelPolicy::default();
        for (level, destinations) in overrides {
            if let Some(destinations) = destinations {
                policy.set(level, destinations);
            }
        }
        policy
    }
}

/// Path of the config file in the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.directory, PathBuf::from("./logs"));
        assert_eq!(config.fallback_directory, PathBuf::from("./logs"));
        assert_eq!(config.retain_days, 7);
        assert_eq!(config.prune_scope, PruneScope::DatedLogs);
        assert_eq!(config.level_policy(), LevelPolicy::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: LoggerConfig = toml::from_str(
            r#"
            directory = "/var/log/myapp"
            prune_scope = "all-files"

            [levels.debug]
            file = true
            console = true
            "#,
        )
        .unwrap();

        assert_eq!(config.directory, PathBuf::from("/var/log/myapp"));
        assert_eq!(config.retain_days, 7);
        assert_eq!(config.prune_scope, PruneScope::AllFiles);

        let policy = config.level_policy();
        assert_eq!(policy.destinations(LogLevel::Debug), Destinations::BOTH);
        assert_eq!(policy.destinations(LogLevel::Info), Destinations::FILE);
    }

    #[test]
    fn test_override_missing_key_is_false() {
        let config: LoggerConfig = toml::from_str("[levels.warn]\nfile = true\n").unwrap();
        assert_eq!(
            config.level_policy().destinations(LogLevel::Warn),
            Destinations::FILE
        );
    }

    #[test]
    fn test_invalid_prune_scope_rejected() {
        let result = toml::from_str::<LoggerConfig>("prune_scope = \"everything\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggerConfig::load(&temp_dir.path().join("daylog.toml")).unwrap();
        assert_eq!(config.retain_days, DEFAULT_RETAIN_DAYS);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("daylog.toml");

        let mut config = LoggerConfig::default();
        config.retain_days = 30;
        config.levels.info = Some(Destinations::BOTH);
        config.save(&path).unwrap();

        let loaded = LoggerConfig::load(&path).unwrap();
        assert_eq!(loaded.retain_days, 30);
        assert_eq!(loaded.levels, config.levels);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("daylog.toml");
        std::fs::write(&path, "retain_days = \"lots\"").unwrap();
        assert!(LoggerConfig::load(&path).is_err());
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with("daylog.toml"));
    }
}
