//! A sled-backed log sink.

use crate::record::LogRecord;
use crate::sink::{LogSink, SinkError, SinkResult};

const RECORDS_TREE: &str = "records";

/// Stores records in an embedded sled database, keyed by a time prefix
/// plus a monotonic sequence number, so a scan returns them in insertion
/// order.
pub struct SledSink {
    db: sled::Db,
}

impl SledSink {
    /// Opens (or creates) the store at `path`.
    pub fn open(path: &str) -> SinkResult<Self> {
        let db = sled::open(path)
            .map_err(|e| SinkError::Database(format!("failed to open store at {path}: {e}")))?;
        Ok(SledSink { db })
    }

    fn tree(&self) -> SinkResult<sled::Tree> {
        self.db
            .open_tree(RECORDS_TREE)
            .map_err(|e| SinkError::Database(format!("failed to open records tree: {e}")))
    }

    fn serialize_record(record: &LogRecord) -> SinkResult<Vec<u8>> {
        serde_json::to_vec(record).map_err(|e| SinkError::Serialization(e.to_string()))
    }

    fn deserialize_record(bytes: &[u8]) -> SinkResult<LogRecord> {
        serde_json::from_slice(bytes).map_err(|e| SinkError::Serialization(e.to_string()))
    }

    /// All stored records in key order.
    pub fn records(&self) -> SinkResult<Vec<LogRecord>> {
        let tree = self.tree()?;
        let mut records = Vec::new();
        for entry in tree.iter() {
            let (_, bytes) = entry.map_err(|e| SinkError::Database(e.to_string()))?;
            records.push(Self::deserialize_record(&bytes)?);
        }
        Ok(records)
    }
}

impl LogSink for SledSink {
    fn insert(&self, record: &LogRecord) -> SinkResult<()> {
        record.validate().map_err(SinkError::InvalidRecord)?;
        let data = Self::serialize_record(record)?;
        // the sequence number breaks ties within one second
        let sequence = self
            .db
            .generate_id()
            .map_err(|e| SinkError::Database(e.to_string()))?;
        let key = format!(
            "{}-{sequence:020}",
            record.event_time.format("%Y%m%d%H%M%S"),
        );

        let tree = self.tree()?;
        tree.insert(key.as_bytes(), data)
            .map_err(|e| SinkError::Database(e.to_string()))?;
        tree.flush().map_err(|e| SinkError::Database(e.to_string()))?;

        log::debug!(
            "recorded {} event for {}",
            record.event_type,
            record.object_type,
        );
        Ok(())
    }
}
