//! The log sink contract and its lightweight implementations.

use crate::record::LogRecord;
use std::sync::Mutex;
use thiserror::Error;

/// Persistence failures surfaced by a sink. Callers decide policy; nothing
/// here retries or reinterprets them.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink database operation failed: {0}")]
    Database(String),

    #[error("record serialization failed: {0}")]
    Serialization(String),

    #[error("sink I/O failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("record rejected: {0}")]
    InvalidRecord(String),
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Durable storage for audit records.
///
/// Records are write-once: a sink accepts inserts and never exposes update
/// or delete of an existing record.
pub trait LogSink: Send + Sync {
    fn insert(&self, record: &LogRecord) -> SinkResult<()>;
}

/// In-memory sink for tests and embedding.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Snapshot of everything inserted so far, in order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn insert(&self, record: &LogRecord) -> SinkResult<()> {
        record.validate().map_err(SinkError::InvalidRecord)?;
        self.records
            .lock()
            .map_err(|_| SinkError::Database("memory sink lock poisoned".to_string()))?
            .push(record.clone());
        Ok(())
    }
}

/// Discards every record. Keeps call sites simple when auditing is off.
pub struct NoopSink;

impl LogSink for NoopSink {
    fn insert(&self, _record: &LogRecord) -> SinkResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EventType, ObjectType, Severity};

    fn sample() -> LogRecord {
        LogRecord::new(
            Severity::Notice,
            EventType::Modified,
            ObjectType::Settings,
            "Tagline was updated from 'a' to 'b'",
        )
    }

    #[test]
    fn memory_sink_keeps_insertion_order() {
        let sink = MemorySink::new();
        sink.insert(&sample()).unwrap();
        sink.insert(&sample().with_user("admin")).unwrap();
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].user_id, "admin");
    }

    #[test]
    fn memory_sink_enforces_record_domains() {
        let sink = MemorySink::new();
        let empty = LogRecord::new(Severity::Info, EventType::Created, ObjectType::Settings, "");
        assert!(matches!(sink.insert(&empty), Err(SinkError::InvalidRecord(_))));
    }

    #[test]
    fn noop_sink_accepts_everything() {
        assert!(NoopSink.insert(&sample()).is_ok());
    }
}
