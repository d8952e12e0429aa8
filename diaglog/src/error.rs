//! diaglog error types
//!
//! Re-exports diaglog-error and provides the errors raised by logger setup.

pub use diaglog_error::{ErrType, Error, Result};

use diaglog_error::KvParam;

/// A configuration setting has a value diaglog does not understand
pub fn config_invalid(setting: &'static str, value: impl Into<String>) -> Error {
    Error::from_msg("invalid config value")
        .with_type(ErrType::CONFIG_INVALID)
        .with_params([
            KvParam::string("setting", setting),
            KvParam::string("value", value),
        ])
}

/// A required environment variable is not set
pub fn missing_env(name: &str) -> Error {
    Error::from_msg(format!("environment variable {} is not set", name))
        .with_type(ErrType::CONFIG_INVALID)
        .with_params([KvParam::string("env", name.to_owned())])
}

/// The logging backend refused to install
pub fn logger_init(err: impl Into<anyhow::Error>) -> Error {
    Error::wrap(err)
        .with_type(ErrType::LOGGER_INIT)
        .with_msg_wrap("install global subscriber")
}
