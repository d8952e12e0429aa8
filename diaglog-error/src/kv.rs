//! Typed key-value parameters attached to errors, contexts and log records

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// The kind of value a [`KvParam`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    String,
    Int,
    Float,
    Bool,
    Timestamp,
    Duration,
}

impl ParamKind {
    /// Every kind, in declaration order
    pub const ALL: [ParamKind; 6] = [
        ParamKind::String,
        ParamKind::Int,
        ParamKind::Float,
        ParamKind::Bool,
        ParamKind::Timestamp,
        ParamKind::Duration,
    ];

    /// Returns the kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Bool => "bool",
            ParamKind::Timestamp => "timestamp",
            ParamKind::Duration => "duration",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The value half of a [`KvParam`].
///
/// Timestamps and durations are kept as signed nanoseconds, the same slot an
/// `Int` uses, so the lossy accessors on [`KvParam`] can reinterpret them.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ParamValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Nanoseconds since the Unix epoch
    Timestamp(i64),
    /// Nanoseconds
    Duration(i64),
}

impl ParamValue {
    /// The kind of this value
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::String(_) => ParamKind::String,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Timestamp(_) => ParamKind::Timestamp,
            ParamValue::Duration(_) => ParamKind::Duration,
        }
    }
}

/// An immutable diagnostic parameter: a key plus a typed value.
///
/// Every accessor is defined for every kind. Reading a parameter through the
/// accessor of another kind never fails; it returns whatever the legacy
/// single-slot encoding would give (`as_bool` on an `Int` is `value != 0`,
/// `as_str` on an `Int` is empty, and so on).
///
/// ```rust
/// use diaglog_error::{KvParam, ParamKind};
///
/// let p = KvParam::bool("cached", true);
/// assert_eq!(p.kind(), ParamKind::Bool);
/// assert!(p.as_bool());
/// assert_eq!(p.as_int(), 1);
/// assert_eq!(p.as_str(), "");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KvParam {
    key: Cow<'static, str>,
    value: ParamValue,
}

impl KvParam {
    // =========================================================================
    // Factories
    // =========================================================================

    /// Build a parameter from an already typed value
    pub fn new(key: impl Into<Cow<'static, str>>, value: ParamValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// String parameter
    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(key, ParamValue::String(value.into()))
    }

    /// String parameter from format arguments, see also [`kv_sprintf!`](crate::kv_sprintf)
    pub fn sprintf(key: impl Into<Cow<'static, str>>, args: fmt::Arguments<'_>) -> Self {
        Self::new(key, ParamValue::String(fmt::format(args)))
    }

    /// Integer parameter
    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, ParamValue::Int(value))
    }

    /// Float parameter
    pub fn float(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(key, ParamValue::Float(value))
    }

    /// Boolean parameter
    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::new(key, ParamValue::Bool(value))
    }

    /// Timestamp parameter.
    ///
    /// Stored as Unix nanoseconds; instants outside the i64 nanosecond range
    /// (roughly years 1677..2262) saturate.
    pub fn timestamp(key: impl Into<Cow<'static, str>>, value: DateTime<Utc>) -> Self {
        let nanos = value.timestamp_nanos_opt().unwrap_or(if value.timestamp() < 0 {
            i64::MIN
        } else {
            i64::MAX
        });
        Self::new(key, ParamValue::Timestamp(nanos))
    }

    /// Duration parameter, saturating at `i64::MAX` nanoseconds
    pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Self {
        let nanos = i64::try_from(value.as_nanos()).unwrap_or(i64::MAX);
        Self::new(key, ParamValue::Duration(nanos))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The parameter key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The parameter kind
    pub fn kind(&self) -> ParamKind {
        self.value.kind()
    }

    /// The typed value
    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    /// String value, empty for every other kind
    pub fn as_str(&self) -> &str {
        match &self.value {
            ParamValue::String(s) => s,
            _ => "",
        }
    }

    /// Integer slot: the int itself, 0/1 for bools, nanoseconds for
    /// timestamps and durations, 0 for strings and floats
    pub fn as_int(&self) -> i64 {
        match self.value {
            ParamValue::Int(v) | ParamValue::Timestamp(v) | ParamValue::Duration(v) => v,
            ParamValue::Bool(b) => i64::from(b),
            ParamValue::String(_) | ParamValue::Float(_) => 0,
        }
    }

    /// Float value, `0.0` for every other kind
    pub fn as_float(&self) -> f64 {
        match self.value {
            ParamValue::Float(v) => v,
            _ => 0.0,
        }
    }

    /// `as_int() != 0`
    pub fn as_bool(&self) -> bool {
        self.as_int() != 0
    }

    /// The integer slot read as Unix nanoseconds
    pub fn as_timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.as_int())
    }

    /// The integer slot read as nanoseconds; negative values clamp to zero
    pub fn as_duration(&self) -> Duration {
        Duration::from_nanos(u64::try_from(self.as_int()).unwrap_or(0))
    }
}

impl fmt::Display for KvParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.key)?;
        match &self.value {
            ParamValue::String(s) => write!(f, "{}", s),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Timestamp(_) => write!(f, "{}", self.as_timestamp().to_rfc3339()),
            ParamValue::Duration(_) => write!(f, "{:?}", self.as_duration()),
        }
    }
}

/// Build a string [`KvParam`] from a format string.
///
/// ```rust
/// use diaglog_error::kv_sprintf;
///
/// let p = kv_sprintf!("path", "{}/{}", "data", 7);
/// assert_eq!(p.as_str(), "data/7");
/// ```
#[macro_export]
macro_rules! kv_sprintf {
    ($key:expr, $($arg:tt)+) => {
        $crate::KvParam::sprintf($key, ::std::format_args!($($arg)+))
    };
}
