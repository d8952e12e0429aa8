//! The Logger: renders and forwards to a sink

use crate::{render, Ctx, KvParam, LogSink, Renderable, Severity};
use std::fmt;
use std::sync::Arc;

/// Structured logger over a [`LogSink`].
///
/// Every call merges the explicit parameters with those attached to `ctx`
/// (and, for classified errors, the error's own parameters and type) before
/// handing one record to the sink. Cloning shares the sink.
///
/// ```rust
/// use diaglog::{Ctx, Error, KvParam, Logger, RecordingSink};
/// use std::sync::Arc;
///
/// let sink = Arc::new(RecordingSink::new());
/// let logger = Logger::from_arc(sink.clone());
///
/// let ctx = logger.ctx_with_params(&Ctx::background(), [KvParam::string("request_id", "r-1")]);
/// let err = Error::from_msg("disk full").with_type("IO");
/// logger.error(&ctx, &err, &[KvParam::int("attempt", 2)]);
///
/// let record = &sink.records()[0];
/// assert_eq!(record.message, "disk full");
/// assert_eq!(record.fields.len(), 3);
/// ```
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Create a logger owning `sink`
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Create a logger over a shared sink
    pub fn from_arc(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Log a plain message at debug level
    pub fn debug(&self, ctx: &Ctx, msg: &str, params: &[KvParam]) {
        self.log(Severity::Debug, ctx, msg.into(), params);
    }

    /// Log a plain message at info level
    pub fn info(&self, ctx: &Ctx, msg: &str, params: &[KvParam]) {
        self.log(Severity::Info, ctx, msg.into(), params);
    }

    /// Log an error at warn level
    pub fn warn<'a>(&self, ctx: &Ctx, err: impl Into<Renderable<'a>>, params: &[KvParam]) {
        self.log(Severity::Warn, ctx, err.into(), params);
    }

    /// Log an error at error level
    pub fn error<'a>(&self, ctx: &Ctx, err: impl Into<Renderable<'a>>, params: &[KvParam]) {
        self.log(Severity::Error, ctx, err.into(), params);
    }

    /// Render `input` and hand it to the sink at `severity`
    pub fn log(&self, severity: Severity, ctx: &Ctx, input: Renderable<'_>, params: &[KvParam]) {
        let rendered = render(input, params, ctx);
        self.sink.emit(severity, &rendered.message, &rendered.fields);
    }

    /// Derive a context carrying `params` in addition to those of `ctx`
    pub fn ctx_with_params<I>(&self, ctx: &Ctx, params: I) -> Ctx
    where
        I: IntoIterator<Item = KvParam>,
    {
        ctx.attach_params(params)
    }

    /// Flush the sink
    pub fn flush(&self) {
        self.sink.flush();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
