//! An append-only JSONL sink with hash-linked lines.
//!
//! Every line carries a SHA-256 hash over the previous line's hash and the
//! serialized record. Editing or truncating the middle of the file breaks
//! the chain, which `verify_chain` detects.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::record::LogRecord;
use crate::sink::{LogSink, SinkError, SinkResult};

/// One hash-linked line of the audit file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainedLine {
    record: LogRecord,
    hash: String,
    prev_hash: Option<String>,
}

pub struct JsonlSink {
    path: PathBuf,
    /// Appends read the previous tail hash and must not interleave.
    append_lock: Mutex<()>,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonlSink {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    /// Hash of the last chained line, if the file has any.
    fn read_last_hash(path: &Path) -> Option<String> {
        let file = File::open(path).ok()?;
        let reader = BufReader::new(file);
        let last_line = reader.lines().map_while(Result::ok).last()?;
        serde_json::from_str::<ChainedLine>(&last_line)
            .ok()
            .map(|line| line.hash)
    }

    /// All records currently in the file, in order.
    pub fn records(&self) -> SinkResult<Vec<LogRecord>> {
        let mut records = Vec::new();
        self.walk_chain(|line| records.push(line.record.clone()))?;
        Ok(records)
    }

    /// Recomputes every hash in the chain and returns the line count.
    pub fn verify_chain(&self) -> SinkResult<usize> {
        self.walk_chain(|_| {})
    }

    fn walk_chain(&self, mut visit: impl FnMut(&ChainedLine)) -> SinkResult<usize> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(SinkError::Io {
                    operation: format!("opening {}", self.path.display()),
                    source: e,
                })
            }
        };

        let reader = BufReader::new(file);
        let mut prev: Option<String> = None;
        let mut count = 0usize;
        for line in reader.lines() {
            let line = line.map_err(|e| SinkError::Io {
                operation: format!("reading {}", self.path.display()),
                source: e,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let chained: ChainedLine =
                serde_json::from_str(&line).map_err(|e| SinkError::Serialization(e.to_string()))?;
            if chained.prev_hash != prev {
                return Err(SinkError::Database(format!(
                    "hash chain broken at line {}",
                    count + 1
                )));
            }
            let serialized = serde_json::to_string(&chained.record)
                .map_err(|e| SinkError::Serialization(e.to_string()))?;
            if chain_hash(prev.as_deref(), &serialized) != chained.hash {
                return Err(SinkError::Database(format!(
                    "hash mismatch at line {}",
                    count + 1
                )));
            }
            visit(&chained);
            prev = Some(chained.hash);
            count += 1;
        }
        Ok(count)
    }
}

impl LogSink for JsonlSink {
    fn insert(&self, record: &LogRecord) -> SinkResult<()> {
        record.validate().map_err(SinkError::InvalidRecord)?;
        let serialized =
            serde_json::to_string(record).map_err(|e| SinkError::Serialization(e.to_string()))?;

        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| SinkError::Database("append lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent).map_err(|e| SinkError::Io {
                    operation: format!("creating {}", parent.display()),
                    source: e,
                })?;
            }
        }

        let prev_hash = Self::read_last_hash(&self.path);
        let hash = chain_hash(prev_hash.as_deref(), &serialized);
        let line = ChainedLine {
            record: record.clone(),
            hash,
            prev_hash,
        };
        let json_line =
            serde_json::to_string(&line).map_err(|e| SinkError::Serialization(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SinkError::Io {
                operation: format!("opening {}", self.path.display()),
                source: e,
            })?;
        writeln!(file, "{json_line}").map_err(|e| SinkError::Io {
            operation: format!("appending to {}", self.path.display()),
            source: e,
        })?;
        Ok(())
    }
}

fn chain_hash(prev: Option<&str>, serialized: &str) -> String {
    let mut hasher = Sha256::new();
    if let Some(prev) = prev {
        hasher.update(prev.as_bytes());
    }
    hasher.update(serialized.as_bytes());
    format!("{:x}", hasher.finalize())
}
