use serde::{Deserialize, Serialize};

use super::allocation::AllocationBehaviour;

/// Main configuration structure for resplan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Message localization
    #[serde(default)]
    pub messages: MessagesConfig,

    /// Allocation selector settings
    #[serde(default)]
    pub allocation: AllocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            messages: MessagesConfig::default(),
            allocation: AllocationConfig::default(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".resplan/resplan.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Message localization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MessagesConfig {
    /// Locale used to resolve user-facing messages
    #[serde(default = "default_locale")]
    pub locale: String,

    /// YAML catalog of translations (locale -> msgid -> text)
    #[serde(default)]
    pub catalog_path: Option<String>,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            catalog_path: None,
        }
    }
}

/// Allocation selector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AllocationConfig {
    /// Behaviour of the allocation being edited
    #[serde(default)]
    pub behaviour: AllocationBehaviour,

    /// Scenario name used when computing load ratios
    #[serde(default = "default_scenario")]
    pub scenario: String,
}

fn default_scenario() -> String {
    "master".to_string()
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            behaviour: AllocationBehaviour::default(),
            scenario: default_scenario(),
        }
    }
}
