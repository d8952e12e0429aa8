//! The classified Error type

use crate::chain::{chain, find_in_chain, same_object};
use crate::{Ctx, ErrType, KvParam};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Rendered in place of a message when an error has no native cause.
pub const NIL_CAUSE_MESSAGE: &str = "ERROR!!! native error is nil";

/// A native error enriched with a classification tag and diagnostic parameters.
///
/// This error type provides:
/// - `cause`: the native error chain (an [`anyhow::Error`], shared)
/// - `err_type`: an optional [`ErrType`] classification tag
/// - `params`: [`KvParam`]s accumulated while the error travels up the stack
///
/// Every builder takes `&self` and returns a new value, so one base error can
/// be enriched independently from several call sites or threads.
///
/// # Example
///
/// ```rust
/// use diaglog_error::{Error, KvParam};
///
/// let err = Error::from_msg("disk full")
///     .with_type("IO")
///     .with_params([KvParam::int("retries", 3)]);
/// let wrapped = err.with_msg_wrap("save failed");
///
/// assert_eq!(wrapped.to_string(), "save failed: disk full");
/// assert_eq!(wrapped.err_type().as_str(), "IO");
/// assert_eq!(wrapped.params(), vec![KvParam::int("retries", 3)]);
/// ```
#[derive(Clone, Default)]
pub struct Error {
    cause: Option<Arc<anyhow::Error>>,
    err_type: ErrType,
    params: Vec<KvParam>,
}

impl Error {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Wrap a native error.
    ///
    /// If a classified [`Error`] already sits anywhere in the chain of `err`,
    /// its cause, type and params are copied into the result instead of
    /// nesting one classified error inside another. Native layers above it
    /// are dropped.
    pub fn wrap(err: impl Into<anyhow::Error>) -> Self {
        let native = err.into();
        match Self::extract(&native) {
            Some(found) => found.rehome(),
            None => Self::from_cause(Arc::new(native)),
        }
    }

    /// Create an unclassified error from a message
    pub fn from_msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self::from_cause(Arc::new(anyhow::Error::msg(message)))
    }

    /// Find the first classified error in the chain of an [`anyhow::Error`]
    pub fn extract(err: &anyhow::Error) -> Option<&Error> {
        let err: &(dyn StdError + 'static) = &**err;
        find_in_chain(err)
    }

    pub(crate) fn from_cause(cause: Arc<anyhow::Error>) -> Self {
        Self {
            cause: Some(cause),
            err_type: ErrType::EMPTY,
            params: Vec::new(),
        }
    }

    fn rehome(&self) -> Self {
        Self {
            cause: self.cause.clone(),
            err_type: self.err_type.clone(),
            params: self.params(),
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the classification tag
    pub fn err_type(&self) -> &ErrType {
        &self.err_type
    }

    /// Get a copy of the parameters recorded on this error
    pub fn params(&self) -> Vec<KvParam> {
        self.params.clone()
    }

    /// Get the native cause, if any
    pub fn native(&self) -> Option<&anyhow::Error> {
        self.cause.as_deref()
    }

    /// Get the native cause as a plain `std::error::Error`
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|e| {
            let e: &(dyn StdError + 'static) = &**e;
            e
        })
    }

    // =========================================================================
    // Builders (non-mutating)
    // =========================================================================

    /// Return a copy with `params` placed before the already recorded ones.
    ///
    /// The order matters at render time, where the first occurrence of a key
    /// wins.
    pub fn with_params<I>(&self, params: I) -> Self
    where
        I: IntoIterator<Item = KvParam>,
    {
        let mut merged: Vec<KvParam> = params.into_iter().collect();
        merged.extend(self.params.iter().cloned());
        Self {
            cause: self.cause.clone(),
            err_type: self.err_type.clone(),
            params: merged,
        }
    }

    /// Return a copy carrying the parameters attached to `ctx`
    pub fn with_ctx(&self, ctx: &Ctx) -> Self {
        self.with_params(ctx.params().iter().cloned())
    }

    /// Return a copy with the classification tag replaced
    pub fn with_type(&self, err_type: impl Into<ErrType>) -> Self {
        Self {
            cause: self.cause.clone(),
            err_type: err_type.into(),
            params: self.params(),
        }
    }

    /// Return a copy whose native cause gains an outer `message` layer.
    ///
    /// The previous cause stays reachable through the new layer's `source()`;
    /// type and params are carried over. An error without a cause stays without one.
    pub fn with_msg_wrap(&self, message: impl Into<String>) -> Self {
        let cause = self.cause.as_ref().map(|inner| {
            Arc::new(anyhow::Error::new(MsgLayer {
                message: message.into(),
                inner: Arc::clone(inner),
            }))
        });
        Self {
            cause,
            err_type: self.err_type.clone(),
            params: self.params(),
        }
    }

    // =========================================================================
    // Classification queries
    // =========================================================================

    /// Check the classification tag
    pub fn is_of_type(&self, err_type: &ErrType) -> bool {
        &self.err_type == err_type
    }

    /// Whether `candidate` is the failure this error describes.
    ///
    /// For a classified `self` and a candidate with a classified error in its
    /// chain: true when both carry the same tag and the candidate's native
    /// cause is not itself classified with that tag. Otherwise the native
    /// chains are compared by identity.
    pub fn is_expected(&self, candidate: &(dyn StdError + 'static)) -> bool {
        if let Some(other) = find_in_chain(candidate) {
            if !self.err_type.is_empty() {
                return self.err_type == other.err_type
                    && !self.err_type.is_error_of_type(other.cause());
            }
        }
        self.shares_native(candidate)
    }

    fn shares_native(&self, candidate: &(dyn StdError + 'static)) -> bool {
        let Some(own) = self.cause() else {
            return false;
        };
        chain(own).any(|link| same_object(link, candidate))
            || chain(candidate).any(|link| same_object(link, own))
    }
}

// =============================================================================
// Message layer added by `with_msg_wrap`
// =============================================================================

#[derive(Debug)]
struct MsgLayer {
    message: String,
    inner: Arc<anyhow::Error>,
}

impl fmt::Display for MsgLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for MsgLayer {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&**self.inner)
    }
}

// =============================================================================
// Display - the native chain joined with ": "
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{:#}", cause),
            None => f.write_str(NIL_CAUSE_MESSAGE),
        }
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.err_type.is_empty() {
            writeln!(f, "unclassified error")?;
        } else {
            writeln!(f, "{} error", self.err_type)?;
        }

        writeln!(f)?;
        writeln!(f, "    Message: {}", self)?;

        if !self.params.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Params:")?;
            for param in &self.params {
                writeln!(f, "        {}", param)?;
            }
        }

        if let Some(cause) = &self.cause {
            writeln!(f)?;
            writeln!(f, "    Cause: {:?}", cause)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

// No `source()`: Display already prints the whole cause chain, so exposing
// the cause again would repeat every message in `{:#}` output. Use `cause()`
// or `chain` to walk below a classified error.
impl StdError for Error {}

// =============================================================================
// Result extension
// =============================================================================

/// Classify and enrich the error side of a `Result` in place.
///
/// ```rust
/// use diaglog_error::{KvParam, ResultExt};
///
/// fn read_config() -> Result<String, std::io::Error> {
///     Err(std::io::Error::other("permission denied"))
/// }
///
/// let err = read_config()
///     .classify("IO")
///     .with_params([KvParam::string("path", "/etc/app.toml")])
///     .unwrap_err();
/// assert_eq!(err.err_type().as_str(), "IO");
/// ```
pub trait ResultExt<T> {
    /// Wrap the error and set its type
    fn classify(self, err_type: impl Into<ErrType>) -> Result<T, Error>;

    /// Wrap the error and prepend `params`
    fn with_params<I>(self, params: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = KvParam>;

    /// Wrap the error and prepend the parameters attached to `ctx`
    fn with_ctx(self, ctx: &Ctx) -> Result<T, Error>;

    /// Wrap the error and add an outer message layer
    fn msg_wrap(self, message: impl Into<String>) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn classify(self, err_type: impl Into<ErrType>) -> Result<T, Error> {
        self.map_err(|e| Error::wrap(e).with_type(err_type))
    }

    fn with_params<I>(self, params: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = KvParam>,
    {
        self.map_err(|e| Error::wrap(e).with_params(params))
    }

    fn with_ctx(self, ctx: &Ctx) -> Result<T, Error> {
        self.map_err(|e| Error::wrap(e).with_ctx(ctx))
    }

    fn msg_wrap(self, message: impl Into<String>) -> Result<T, Error> {
        self.map_err(|e| Error::wrap(e).with_msg_wrap(message))
    }
}
