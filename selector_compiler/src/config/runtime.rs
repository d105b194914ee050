// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Runtime configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid runtime configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerPreferences {
    /// Whether to collect per-scan token metrics
    pub collect_metrics: bool,

    /// Whether to log every lexical context entry and exit at debug level
    pub log_context_transitions: bool,

    /// Whether scanner errors should carry the unclassified remainder
    pub include_remainder_in_errors: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            collect_metrics: env_flag(env_vars::SCANNER_COLLECT_METRICS, true),
            log_context_transitions: env_flag(env_vars::SCANNER_LOG_TRANSITIONS, false),
            include_remainder_in_errors: env_flag(env_vars::SCANNER_INCLUDE_REMAINDER, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreferences {
    /// Whether to log each delegation to a sub-grammar
    pub log_delegation: bool,

    /// Whether to log token mismatches before they propagate
    pub log_mismatches: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            log_delegation: env_flag(env_vars::PARSER_LOG_DELEGATION, false),
            log_mismatches: env_flag(env_vars::PARSER_LOG_MISMATCHES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level written by the global logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub(crate) fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub scanner: ScannerPreferences,
    pub parser: ParserPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse runtime preferences from TOML; missing sections keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load runtime preferences from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Scanner
    pub const SCANNER_COLLECT_METRICS: &str = "SELECTOR_SCANNER_COLLECT_METRICS";
    pub const SCANNER_LOG_TRANSITIONS: &str = "SELECTOR_SCANNER_LOG_TRANSITIONS";
    pub const SCANNER_INCLUDE_REMAINDER: &str = "SELECTOR_SCANNER_INCLUDE_REMAINDER";

    // Parser
    pub const PARSER_LOG_DELEGATION: &str = "SELECTOR_PARSER_LOG_DELEGATION";
    pub const PARSER_LOG_MISMATCHES: &str = "SELECTOR_PARSER_LOG_MISMATCHES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SELECTOR_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SELECTOR_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SELECTOR_LOGGING_MIN_LEVEL";
}
