//! Application configuration.
//!
//! # Responsibility
//! - Deserialize the optional TOML config file into typed settings.
//! - Validate settings before any service is built from them.
//!
//! # Invariants
//! - Every field has a default; an empty file equals `AppConfig::default()`.
//! - Unknown keys are rejected so typos surface instead of being ignored.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir, LoggingError};
use crate::model::task::StatusPolicy;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_RECENT_LIMIT: usize = 3;

/// Errors from loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Logging(LoggingError),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Logging(err) => write!(f, "invalid logging config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub status_policy: StatusPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// How many recent entries / upcoming tasks the dashboard shows.
    pub recent_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Seed the demo team, entries and tasks on startup.
    pub seed_demo_data: bool,
    /// Email of the acting user; first team member when unset.
    pub current_user: Option<String>,
    pub logging: LoggingConfig,
    pub board: BoardConfig,
    pub dashboard: DashboardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            current_user: None,
            logging: LoggingConfig::default(),
            board: BoardConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(
            "event=config_load module=config status=ok path={} status_policy={:?}",
            path.display(),
            config.board.status_policy
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.logging.level)?;
        if let Some(dir) = self.logging.dir.as_deref() {
            normalize_log_dir(dir)?;
        }
        if self.dashboard.recent_limit == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.recent_limit must be at least 1".to_string(),
            ));
        }
        if let Some(email) = self.current_user.as_deref() {
            if email.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "current_user must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use crate::model::task::StatusPolicy;

    #[test]
    fn empty_text_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.seed_demo_data);
        assert_eq!(config.board.status_policy, StatusPolicy::Free);
        assert_eq!(config.dashboard.recent_limit, 3);
    }

    #[test]
    fn parses_all_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            seed_demo_data = false
            current_user = "sarah@example.com"

            [logging]
            level = "warn"

            [board]
            status_policy = "workflow"

            [dashboard]
            recent_limit = 5
            "#,
        )
        .unwrap();
        assert!(!config.seed_demo_data);
        assert_eq!(config.current_user.as_deref(), Some("sarah@example.com"));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.board.status_policy, StatusPolicy::Workflow);
        assert_eq!(config.dashboard.recent_limit, 5);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            AppConfig::from_toml_str("colour = true").unwrap_err(),
            ConfigError::Parse(_)
        ));
        assert!(matches!(
            AppConfig::from_toml_str("[logging]\nlevel = \"chatty\"").unwrap_err(),
            ConfigError::Logging(_)
        ));
        assert!(matches!(
            AppConfig::from_toml_str("[logging]\ndir = \"relative/logs\"").unwrap_err(),
            ConfigError::Logging(_)
        ));
        assert!(matches!(
            AppConfig::from_toml_str("[dashboard]\nrecent_limit = 0").unwrap_err(),
            ConfigError::Invalid(_)
        ));
    }
}
