//! Logger configuration and bootstrap
//!
//! The configuration has two required settings, read either through serde or
//! from the environment:
//!
//! | env var        | values                             |
//! |----------------|------------------------------------|
//! | `LOG_LEVEL`    | `debug`, `info`, `warning`, `error` |
//! | `LOG_ENCODING` | `text`, `json`                     |

use crate::error::{self, Result};
use crate::{Logger, TracingSink};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Default environment prefix used by [`LoggerConfig::from_env`]
pub const ENV_PREFIX: &str = "LOG";

/// Minimum level that reaches the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Returns the level as it is spelled in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    /// The matching `tracing-subscriber` level filter
    pub fn as_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(error::config_invalid("level", other)
                .with_msg_wrap(format!("unknown log level: {}", other))),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = error::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_owned()
    }
}

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogEncoding {
    /// Human-readable single-line output
    Text,
    /// One JSON object per line
    Json,
}

impl LogEncoding {
    /// Returns the encoding as it is spelled in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            LogEncoding::Text => "text",
            LogEncoding::Json => "json",
        }
    }
}

impl fmt::Display for LogEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogEncoding {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(LogEncoding::Text),
            "json" => Ok(LogEncoding::Json),
            other => Err(error::config_invalid("encoding", other)
                .with_msg_wrap(format!("unknown log encoding: {}", other))),
        }
    }
}

impl TryFrom<String> for LogEncoding {
    type Error = error::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LogEncoding> for String {
    fn from(encoding: LogEncoding) -> Self {
        encoding.as_str().to_owned()
    }
}

/// Logger settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub encoding: LogEncoding,
}

impl LoggerConfig {
    /// Read `LOG_LEVEL` and `LOG_ENCODING`
    pub fn from_env() -> Result<Self> {
        Self::from_env_prefixed(ENV_PREFIX)
    }

    /// Read `{prefix}_LEVEL` and `{prefix}_ENCODING`
    pub fn from_env_prefixed(prefix: &str) -> Result<Self> {
        Self::from_lookup(prefix, |name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; both variables are required
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |suffix: &str| {
            let name = format!("{}_{}", prefix, suffix);
            lookup(&name).ok_or_else(|| error::missing_env(&name))
        };
        Ok(Self {
            level: required("LEVEL")?.parse()?,
            encoding: required("ENCODING")?.parse()?,
        })
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            encoding: LogEncoding::Text,
        }
    }
}

/// Install a global `tracing` subscriber writing to stdout and return a
/// [`Logger`] that renders into it.
///
/// The configured level is the default directive; `RUST_LOG` can refine it.
/// Fails if a global subscriber is already installed.
pub fn init_logger(cfg: &LoggerConfig) -> Result<Logger> {
    let filter = EnvFilter::builder()
        .with_default_directive(cfg.level.as_level_filter().into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false);

    let installed = match cfg.encoding {
        LogEncoding::Text => builder.compact().try_init(),
        LogEncoding::Json => builder.json().with_ansi(false).try_init(),
    };
    installed.map_err(|e| error::logger_init(anyhow::anyhow!(e)))?;

    tracing::debug!(level = %cfg.level, encoding = %cfg.encoding, "logger initialised");
    Ok(Logger::new(TracingSink::new(cfg.encoding)))
}
