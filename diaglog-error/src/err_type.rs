//! Classification tags for errors

use crate::chain::chain;
use crate::Error;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// An opaque classification tag carried by a classified [`Error`].
///
/// The empty tag means "unclassified". Tags are compared by value, so any
/// crate can mint its own without registering it anywhere.
///
/// ```rust
/// use diaglog_error::{ErrType, Error};
///
/// const NOT_FOUND: ErrType = ErrType::from_static("not_found");
///
/// let err = Error::from_msg("no such user").with_type(NOT_FOUND);
/// assert!(err.is_of_type(&NOT_FOUND));
/// assert!(NOT_FOUND.is_error_of_type(Some(&err)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrType(Cow<'static, str>);

impl ErrType {
    // =========================================================================
    // Well-known types
    // =========================================================================

    /// Unclassified
    pub const EMPTY: ErrType = ErrType::from_static("");

    /// Invalid logger configuration
    pub const CONFIG_INVALID: ErrType = ErrType::from_static("config_invalid");

    /// The logging backend could not be installed
    pub const LOGGER_INIT: ErrType = ErrType::from_static("logger_init");

    /// Create a tag from a static string, usable in `const` items
    pub const fn from_static(tag: &'static str) -> Self {
        ErrType(Cow::Borrowed(tag))
    }

    /// Create a tag
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        ErrType(tag.into())
    }

    /// Returns the tag as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the unclassified tag
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any classified [`Error`] in the chain of `err` carries this tag.
    ///
    /// A missing error only matches the empty tag.
    pub fn is_error_of_type(&self, err: Option<&(dyn StdError + 'static)>) -> bool {
        match err {
            None => self.is_empty(),
            Some(err) => chain(err)
                .filter_map(|e| e.downcast_ref::<Error>())
                .any(|e| e.err_type() == self),
        }
    }
}

impl fmt::Display for ErrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ErrType {
    fn from(tag: &'static str) -> Self {
        ErrType::from_static(tag)
    }
}

impl From<String> for ErrType {
    fn from(tag: String) -> Self {
        ErrType(Cow::Owned(tag))
    }
}

impl From<&ErrType> for ErrType {
    fn from(tag: &ErrType) -> Self {
        tag.clone()
    }
}

impl PartialEq<str> for ErrType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ErrType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
