//! Append-only persistence of anonymized candidate records (JSON Lines).

pub mod anonymize;

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::candidate::AnonymizedRecord;

/// File name used when `CANDIDATE_STORE_PATH` is not set.
pub const DEFAULT_STORE_PATH: &str = "simulated_candidate_data.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("corrupt record at {path}:{line}: {source}")]
    Corrupt {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Storage abstraction so the stage machine can be exercised without a file.
pub trait CandidateStore: Send + Sync {
    fn persist(&self, record: &AnonymizedRecord) -> Result<(), StoreError>;
}

/// JSON Lines file store: one self-contained object per line, no header.
///
/// Every `persist` opens the file in append mode, issues a single `write_all`
/// of the complete line and closes it again.
#[derive(Debug, Clone)]
pub struct JsonlCandidateStore {
    path: PathBuf,
}

impl JsonlCandidateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Streams the store back line by line. A missing file is an empty store.
    #[allow(dead_code)]
    pub fn records(&self) -> Result<Vec<AnonymizedRecord>, StoreError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| StoreError::Corrupt {
                path: self.path.display().to_string(),
                line: idx + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Number of stored records: non-blank lines, without parsing them.
    pub fn count(&self) -> Result<usize, StoreError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut count = 0;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| self.io_error(e))?;
            if !line.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CandidateStore for JsonlCandidateStore {
    fn persist(&self, record: &AnonymizedRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| self.io_error(e))?;

        debug!("Appended {} bytes to {}", line.len(), self.path.display());
        Ok(())
    }
}
