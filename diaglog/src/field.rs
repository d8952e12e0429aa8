//! Rendered log fields
//!
//! A [`Field`] is what a [`LogSink`](crate::LogSink) receives: a parameter
//! whose value has been resolved to a concrete, printable type.

use crate::{KvParam, ParamValue};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::time::Duration;

/// A resolved field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Duration(Duration),
    /// A value this renderer does not know how to print; renders empty
    Opaque,
}

/// One key-value pair handed to a sink
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    /// Resolve a parameter into a field
    pub fn from_param(param: &KvParam) -> Self {
        let value = match param.value() {
            ParamValue::String(_) => FieldValue::String(param.as_str().to_owned()),
            ParamValue::Int(_) => FieldValue::Int(param.as_int()),
            ParamValue::Float(_) => FieldValue::Float(param.as_float()),
            ParamValue::Bool(_) => FieldValue::Bool(param.as_bool()),
            ParamValue::Timestamp(_) => FieldValue::Timestamp(param.as_timestamp()),
            ParamValue::Duration(_) => FieldValue::Duration(param.as_duration()),
            _ => FieldValue::Opaque,
        };
        Self {
            key: param.key().to_owned(),
            value,
        }
    }
}

impl From<&KvParam> for Field {
    fn from(param: &KvParam) -> Self {
        Field::from_param(param)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Timestamp(ts) => {
                write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::Duration(d) => write!(f, "{:?}", d),
            FieldValue::Opaque => Ok(()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Int(v) => serializer.serialize_i64(*v),
            FieldValue::Float(v) => serializer.serialize_f64(*v),
            FieldValue::Bool(v) => serializer.serialize_bool(*v),
            FieldValue::Timestamp(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::Duration(d) => serializer.serialize_f64(d.as_secs_f64()),
            FieldValue::Opaque => serializer.serialize_str(""),
        }
    }
}

/// Serializes a slice of fields as one flat object, keeping field order
pub struct FieldMap<'a>(pub &'a [Field]);

impl Serialize for FieldMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for field in self.0 {
            map.serialize_entry(&field.key, &field.value)?;
        }
        map.end()
    }
}

impl fmt::Display for FieldMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamKind;
    use serde_json::json;

    fn sample(kind: ParamKind) -> KvParam {
        match kind {
            ParamKind::String => KvParam::string("k", "v"),
            ParamKind::Int => KvParam::int("k", 7),
            ParamKind::Float => KvParam::float("k", 0.5),
            ParamKind::Bool => KvParam::bool("k", true),
            ParamKind::Timestamp => KvParam::timestamp("k", Utc::now()),
            ParamKind::Duration => KvParam::duration("k", Duration::from_secs(1)),
        }
    }

    #[test]
    fn test_every_kind_has_a_renderer() {
        for kind in ParamKind::ALL {
            let field = Field::from_param(&sample(kind));
            let matches = matches!(
                (kind, &field.value),
                (ParamKind::String, FieldValue::String(_))
                    | (ParamKind::Int, FieldValue::Int(_))
                    | (ParamKind::Float, FieldValue::Float(_))
                    | (ParamKind::Bool, FieldValue::Bool(_))
                    | (ParamKind::Timestamp, FieldValue::Timestamp(_))
                    | (ParamKind::Duration, FieldValue::Duration(_))
            );
            assert!(matches, "{} rendered as {:?}", kind, field.value);
        }
    }

    #[test]
    fn test_field_values() {
        assert_eq!(
            Field::from_param(&KvParam::int("retries", 3)),
            Field {
                key: "retries".into(),
                value: FieldValue::Int(3)
            }
        );
        assert_eq!(
            Field::from_param(&KvParam::bool("ok", false)).value,
            FieldValue::Bool(false)
        );
    }

    #[test]
    fn test_field_map_json() {
        let ts = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let fields = vec![
            Field::from_param(&KvParam::string("user", "alice")),
            Field::from_param(&KvParam::int("retries", 3)),
            Field::from_param(&KvParam::duration("took", Duration::from_millis(1500))),
            Field::from_param(&KvParam::timestamp("at", ts)),
            Field {
                key: "blob".into(),
                value: FieldValue::Opaque,
            },
        ];
        let value = serde_json::to_value(FieldMap(&fields)).unwrap();
        assert_eq!(
            value,
            json!({
                "user": "alice",
                "retries": 3,
                "took": 1.5,
                "at": "1970-01-01T00:00:00Z",
                "blob": "",
            })
        );
    }

    #[test]
    fn test_field_map_display() {
        let fields = vec![
            Field::from_param(&KvParam::string("user", "alice")),
            Field::from_param(&KvParam::bool("admin", true)),
        ];
        assert_eq!(FieldMap(&fields).to_string(), "user=alice admin=true");
    }
}
