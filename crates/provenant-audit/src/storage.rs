//! Provenance storage backends.

use crate::error::AuditError;
use crate::record::ProvenanceRecord;
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Trait for provenance storage backends.
///
/// Storage is append-only: implementations never rewrite, reorder or delete
/// records that were already appended.
#[async_trait]
pub trait ProvenanceStorage: Send + Sync {
    /// Append one record after all existing records.
    async fn append(&self, record: &ProvenanceRecord) -> Result<(), AuditError>;

    /// Read back every record, oldest first.
    async fn records(&self) -> Result<Vec<ProvenanceRecord>, AuditError>;
}

/// JSON Lines file storage.
///
/// Each append opens the file in append mode (creating it if needed), writes
/// one complete line and closes it again. Appends through the same
/// `FileStorage` are serialised, so concurrent callers never interleave bytes.
pub struct FileStorage {
    path: PathBuf,
    sync: bool,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a file storage. The file itself is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Call `sync_data` after every append.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &[u8]) -> Result<(), AuditError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| AuditError::Storage(format!("failed to acquire write lock: {}", e)))?;

        // The handle is dropped when this scope ends, on success or error.
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::Open {
                path: self.path.clone(),
                source,
            })?;

        file.write_all(line).map_err(|source| AuditError::Write {
            path: self.path.clone(),
            source,
        })?;

        if self.sync {
            file.sync_data().map_err(|source| AuditError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        Ok(())
    }

    fn read_records(&self) -> Result<Vec<ProvenanceRecord>, AuditError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            // Nothing has been recorded yet.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(AuditError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| AuditError::Read {
                path: self.path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| AuditError::CorruptRecord {
                line: index + 1,
                source,
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl ProvenanceStorage for FileStorage {
    async fn append(&self, record: &ProvenanceRecord) -> Result<(), AuditError> {
        // Serialise fully before touching the file so a serialisation failure
        // can never leave a partial line behind.
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.append_line(&line)
    }

    async fn records(&self) -> Result<Vec<ProvenanceRecord>, AuditError> {
        self.read_records()
    }
}

/// File storage that also emits each record as an `info` event.
///
/// The echo goes through `tracing`, so it lands on the log output and never
/// mixes with a command's own stdout.
pub struct DualStorage {
    file: FileStorage,
}

impl DualStorage {
    pub fn new(file: FileStorage) -> Self {
        Self { file }
    }
}

#[async_trait]
impl ProvenanceStorage for DualStorage {
    async fn append(&self, record: &ProvenanceRecord) -> Result<(), AuditError> {
        self.file.append(record).await?;
        tracing::info!(
            url = record.url(),
            allowed = record.allowed(),
            "{}",
            record.to_log_line()
        );
        Ok(())
    }

    async fn records(&self) -> Result<Vec<ProvenanceRecord>, AuditError> {
        self.file.records().await
    }
}

/// In-memory storage, for tests and embedding.
#[derive(Default)]
pub struct MemoryStorage {
    records: RwLock<Vec<ProvenanceRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProvenanceStorage for MemoryStorage {
    async fn append(&self, record: &ProvenanceRecord) -> Result<(), AuditError> {
        self.records
            .write()
            .map_err(|e| AuditError::Storage(format!("failed to acquire write lock: {}", e)))?
            .push(record.clone());
        Ok(())
    }

    async fn records(&self) -> Result<Vec<ProvenanceRecord>, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::Storage(format!("failed to acquire read lock: {}", e)))?;
        Ok(records.clone())
    }
}
