//! # diaglog
//!
//! Structured diagnostics: classified errors, typed parameters and
//! request-scoped context merged into one log record.
//!
//! ## Core Concepts
//! - **KvParam / Ctx / Error**: re-exported from `diaglog-error`
//! - **Renderer**: merges explicit, error and context parameters, first key wins
//! - **LogSink**: the outbound capability (`tracing` backed, or recording)
//! - **Logger**: debug/info/warn/error entry points over a sink
//! - **Config**: level and encoding, from serde or the environment
//!
//! ```rust,no_run
//! use diaglog::{init_logger, Ctx, KvParam, LoggerConfig};
//!
//! let logger = init_logger(&LoggerConfig::from_env()?)?;
//! let ctx = logger.ctx_with_params(&Ctx::background(), [KvParam::string("job", "reindex")]);
//! logger.info(&ctx, "started", &[]);
//! # Ok::<(), diaglog::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod logger;
pub mod render;
pub mod severity;
pub mod sink;

pub use config::{init_logger, LogEncoding, LogLevel, LoggerConfig};
pub use diaglog_error::{
    attach_params, chain, find_in_chain, kv_sprintf, read_params, Ctx, KvParam, ParamKind,
    ParamValue, ResultExt, NIL_CAUSE_MESSAGE,
};
pub use error::{ErrType, Error, Result};
pub use field::{Field, FieldMap, FieldValue};
pub use logger::Logger;
pub use render::{dedup_fields, render, Renderable, Rendered, ERR_TYPE_KEY};
pub use severity::Severity;
pub use sink::{LogSink, Record, RecordingSink, TracingSink};
