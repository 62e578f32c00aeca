//! Subscriber initialisation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events follow the configured level.
const STOREFRONT_TARGETS: &[&str] = &[
    "dental_commerce",
    "dental_router",
    "dental_content",
    "dental_data",
    "dental_cli",
    "storefront",
];

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing(&self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }

    fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LoggingError::InvalidLevel(other.to_string())),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for development).
    #[default]
    Human,
    /// JSON format (for production/log aggregation).
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" | "pretty" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::InvalidFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Invalid log level '{0}' (expected trace, debug, info, warn or error)")]
    InvalidLevel(String),

    #[error("Invalid log format '{0}' (expected human or json)")]
    InvalidFormat(String),

    #[error("Invalid filter directive: {0}")]
    InvalidDirective(String),

    #[error("A global subscriber is already installed")]
    AlreadyInstalled,
}

/// Logging settings, also read from the `[logging]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for storefront crates.
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include the module target in each line.
    pub include_target: bool,
    /// Extra `EnvFilter` directives, e.g. `reqwest=debug`.
    pub directives: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Human,
            include_target: false,
            directives: Vec::new(),
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Filter directives implied by this config: dependencies at `warn`,
    /// storefront crates at the configured level, then the extras.
    pub fn filter_directives(&self) -> Vec<String> {
        let mut directives = vec!["warn".to_string()];
        directives.extend(
            STOREFRONT_TARGETS
                .iter()
                .map(|t| format!("{}={}", t, self.level)),
        );
        directives.extend(self.directives.iter().cloned());
        directives
    }

    /// Build the filter. `RUST_LOG`, when set, replaces the configured one.
    pub fn build_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Ok(env) = std::env::var(EnvFilter::DEFAULT_ENV) {
            if !env.trim().is_empty() {
                return EnvFilter::try_new(env)
                    .map_err(|e| LoggingError::InvalidDirective(e.to_string()));
            }
        }
        self.configured_filter()
    }

    fn configured_filter(&self) -> Result<EnvFilter, LoggingError> {
        let mut filter = EnvFilter::default();
        for directive in self.filter_directives() {
            let parsed = directive
                .parse()
                .map_err(|_| LoggingError::InvalidDirective(directive.clone()))?;
            filter = filter.add_directive(parsed);
        }
        Ok(filter)
    }
}

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Install the global subscriber.
///
/// Only the first call installs anything; later calls return `Ok` without
/// changing the subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = config.build_filter()?;
    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tfmt::layer()
                    .json()
                    .with_target(config.include_target)
                    .with_current_span(true),
            )
            .try_init(),
        LogFormat::Human => registry
            .with(
                tfmt::layer()
                    .with_target(config.include_target)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    match result {
        Ok(()) => {
            let _ = INSTALLED.set(config.format);
            Ok(())
        }
        Err(_) => Err(LoggingError::AlreadyInstalled),
    }
}

/// Format of the installed subscriber, if [`init_logging`] succeeded.
pub fn installed_format() -> Option<LogFormat> {
    INSTALLED.get().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!(matches!(
            "loud".parse::<LogLevel>(),
            Err(LoggingError::InvalidLevel(_))
        ));
        assert_eq!(LogLevel::Error.as_tracing(), Level::ERROR);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("Pretty".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_filter_directives() {
        let config = LoggingConfig::default()
            .with_level(LogLevel::Debug)
            .with_directive("reqwest=info");
        let directives = config.filter_directives();
        assert_eq!(directives[0], "warn");
        assert!(directives.contains(&"dental_data=debug".to_string()));
        assert_eq!(directives.last().map(String::as_str), Some("reqwest=info"));
        assert!(config.configured_filter().is_ok());
    }

    #[test]
    fn test_bad_directive_rejected() {
        let config = LoggingConfig::default().with_directive("=[");
        assert!(matches!(
            config.configured_filter(),
            Err(LoggingError::InvalidDirective(_))
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level": "trace", "format": "json"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.directives.is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        let first = init_logging(&config);
        // another test binary may already have a subscriber
        if first.is_ok() {
            assert!(init_logging(&config.clone().with_format(LogFormat::Json)).is_ok());
            assert_eq!(installed_format(), Some(LogFormat::Human));
        }
    }
}
