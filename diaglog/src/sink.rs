//! Log sinks
//!
//! A sink is the outbound side of diaglog: it receives an already rendered
//! message and deduplicated fields. Two sinks ship with the crate:
//! - [`TracingSink`]: forwards to `tracing`, for production
//! - [`RecordingSink`]: keeps records in memory, for tests

use crate::config::LogEncoding;
use crate::{Field, FieldMap, Severity};
use parking_lot::Mutex;

/// Target used for every event emitted by [`TracingSink`]
pub const TRACING_TARGET: &str = "diaglog";

/// The logging capability diaglog renders into
pub trait LogSink: Send + Sync {
    /// Accept one record
    fn emit(&self, severity: Severity, message: &str, fields: &[Field]);

    /// Flush buffered records, if the sink buffers
    fn flush(&self) {}
}

// =============================================================================
// TracingSink
// =============================================================================

/// Emits each record as a `tracing` event.
///
/// The fields travel in a single `fields` value: a JSON object for
/// [`LogEncoding::Json`], `key=value` pairs for [`LogEncoding::Text`].
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    encoding: LogEncoding,
}

impl TracingSink {
    /// Create a sink encoding fields as `encoding`
    pub fn new(encoding: LogEncoding) -> Self {
        Self { encoding }
    }

    /// Encode fields for the `fields` event value
    pub fn encode_fields(&self, fields: &[Field]) -> String {
        match self.encoding {
            LogEncoding::Text => FieldMap(fields).to_string(),
            LogEncoding::Json => {
                serde_json::to_string(&FieldMap(fields)).unwrap_or_else(|_| String::from("{}"))
            }
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(LogEncoding::Text)
    }
}

macro_rules! emit_at {
    ($level:expr, $message:expr, $fields:expr) => {
        if $fields.is_empty() {
            tracing::event!(target: TRACING_TARGET, $level, "{}", $message)
        } else {
            tracing::event!(target: TRACING_TARGET, $level, fields = %$fields, "{}", $message)
        }
    };
}

impl LogSink for TracingSink {
    fn emit(&self, severity: Severity, message: &str, fields: &[Field]) {
        let encoded = if fields.is_empty() {
            String::new()
        } else {
            self.encode_fields(fields)
        };
        match severity {
            Severity::Debug => emit_at!(tracing::Level::DEBUG, message, encoded),
            Severity::Info => emit_at!(tracing::Level::INFO, message, encoded),
            Severity::Warn => emit_at!(tracing::Level::WARN, message, encoded),
            Severity::Error => emit_at!(tracing::Level::ERROR, message, encoded),
        }
    }
}

// =============================================================================
// RecordingSink
// =============================================================================

/// One record captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub severity: Severity,
    pub message: String,
    pub fields: Vec<Field>,
}

impl Record {
    /// The field with the given key, if present
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Keeps every emitted record in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Record>>,
    flushes: Mutex<usize>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all records so far
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Remove and return all records so far
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }

    /// How many times `flush` was called
    pub fn flush_count(&self) -> usize {
        *self.flushes.lock()
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, severity: Severity, message: &str, fields: &[Field]) {
        self.records.lock().push(Record {
            severity,
            message: message.to_owned(),
            fields: fields.to_vec(),
        });
    }

    fn flush(&self) {
        *self.flushes.lock() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KvParam;

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        let fields = vec![Field::from_param(&KvParam::int("n", 1))];
        sink.emit(Severity::Info, "hello", &fields);
        sink.flush();

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "hello");
        assert_eq!(records[0].field("n"), Some(&fields[0]));
        assert_eq!(sink.flush_count(), 1);

        assert_eq!(sink.take().len(), 1);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_tracing_sink_encoding() {
        let fields = vec![
            Field::from_param(&KvParam::string("user", "alice")),
            Field::from_param(&KvParam::int("retries", 3)),
        ];
        assert_eq!(
            TracingSink::new(LogEncoding::Text).encode_fields(&fields),
            "user=alice retries=3"
        );
        assert_eq!(
            TracingSink::new(LogEncoding::Json).encode_fields(&fields),
            r#"{"user":"alice","retries":3}"#
        );
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        // no subscriber installed: emitting must be a silent no-op
        let sink = TracingSink::default();
        sink.emit(Severity::Error, "boom", &[]);
        sink.emit(
            Severity::Debug,
            "quiet",
            &[Field::from_param(&KvParam::bool("x", true))],
        );
    }
}
