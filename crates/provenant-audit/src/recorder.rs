//! Provenance recorder.
//!
//! [`ProvenanceRecorder`] turns a decision into a [`ProvenanceRecord`] and
//! appends it to whatever storage handle it was given. It holds no global
//! state, so each test can hand it its own temporary file or in-memory log.

use chrono::{DateTime, Utc};
use provenant_core::{AuditConfig, DirectiveSet};
use std::sync::Arc;

use crate::error::AuditError;
use crate::record::ProvenanceRecord;
use crate::storage::{DualStorage, FileStorage, MemoryStorage, ProvenanceStorage};

/// Writes and queries provenance records.
#[derive(Clone)]
pub struct ProvenanceRecorder {
    storage: Arc<dyn ProvenanceStorage>,
}

impl ProvenanceRecorder {
    /// Create a recorder over an explicit storage handle.
    pub fn new(storage: Arc<dyn ProvenanceStorage>) -> Self {
        Self { storage }
    }

    /// Create a recorder from configuration: a JSON Lines file, optionally
    /// echoed as log events.
    pub fn from_config(config: &AuditConfig) -> Self {
        let file = FileStorage::new(&config.path).with_sync(config.sync);
        let storage: Arc<dyn ProvenanceStorage> = if config.echo {
            Arc::new(DualStorage::new(file))
        } else {
            Arc::new(file)
        };
        Self { storage }
    }

    /// Create a recorder backed by memory only (useful for tests).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Record a decision.
    ///
    /// The timestamp is taken now. Returns the record exactly as appended, or
    /// the storage failure; a failed append is never reported as success.
    pub async fn record(
        &self,
        url: &str,
        allowed: bool,
        directives: DirectiveSet,
    ) -> Result<ProvenanceRecord, AuditError> {
        let record = ProvenanceRecord::new(url, allowed, directives);
        self.append(&record).await?;
        Ok(record)
    }

    /// Append an already constructed record.
    pub async fn append(&self, record: &ProvenanceRecord) -> Result<(), AuditError> {
        self.storage.append(record).await.inspect_err(|e| {
            tracing::error!(url = %record.url(), error = %e, "Failed to append provenance record");
        })?;

        tracing::debug!(
            url = %record.url(),
            allowed = record.allowed(),
            checked_at = %record.checked_at(),
            directives = record.directives().len(),
            "Provenance recorded"
        );

        Ok(())
    }

    /// Query records with filters.
    pub async fn query(&self, filter: ProvenanceFilter) -> Result<Vec<ProvenanceRecord>, AuditError> {
        let records = self.storage.records().await?;
        Ok(filter.apply(records))
    }

    /// Count records matching a filter (ignores limit/offset).
    pub async fn count(&self, filter: ProvenanceFilter) -> Result<usize, AuditError> {
        let records = self.storage.records().await?;
        Ok(records.iter().filter(|r| filter.matches(r)).count())
    }

    /// Most recent records for one URL, newest first.
    pub async fn history_for(
        &self,
        url: &str,
        limit: usize,
    ) -> Result<Vec<ProvenanceRecord>, AuditError> {
        self.query(ProvenanceFilter {
            url: Some(url.to_string()),
            limit: Some(limit),
            newest_first: true,
            ..Default::default()
        })
        .await
    }
}

/// Filter for querying provenance records.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceFilter {
    /// Filter by exact URL.
    pub url: Option<String>,
    /// Filter by verdict.
    pub allowed: Option<bool>,
    /// Only records checked at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Only records checked at or before this time.
    pub until: Option<DateTime<Utc>>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
    /// Return newest records first instead of log order.
    pub newest_first: bool,
}

impl ProvenanceFilter {
    /// Whether a record passes the field filters.
    pub fn matches(&self, record: &ProvenanceRecord) -> bool {
        if let Some(ref url) = self.url {
            if record.url() != url {
                return false;
            }
        }
        if let Some(allowed) = self.allowed {
            if record.allowed() != allowed {
                return false;
            }
        }
        if let Some(since) = self.since {
            if record.checked_at() < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if record.checked_at() > until {
                return false;
            }
        }
        true
    }

    fn apply(&self, records: Vec<ProvenanceRecord>) -> Vec<ProvenanceRecord> {
        let mut results: Vec<_> = records.into_iter().filter(|r| self.matches(r)).collect();

        if self.newest_first {
            results.reverse();
        }
        if let Some(offset) = self.offset {
            results = results.into_iter().skip(offset).collect();
        }
        if let Some(limit) = self.limit {
            results.truncate(limit);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use provenant_core::DirectiveName;
    use std::path::PathBuf;

    fn directives() -> DirectiveSet {
        DirectiveSet::new()
            .with(DirectiveName::UserAgent, "AI-Training-Crawler")
            .with(DirectiveName::Disallow, "/private")
    }

    #[tokio::test]
    async fn test_record_returns_appended_record() {
        let recorder = ProvenanceRecorder::in_memory();

        let record = recorder
            .record("http://127.0.0.1:5000/private/secret", false, directives())
            .await
            .unwrap();

        let stored = recorder.query(ProvenanceFilter::default()).await.unwrap();
        assert_eq!(stored, vec![record]);
        assert_eq!(stored[0].directives(), &directives());
    }

    #[tokio::test]
    async fn test_same_url_is_not_deduplicated() {
        let recorder = ProvenanceRecorder::in_memory();
        for _ in 0..3 {
            recorder
                .record("https://example.com/a", false, DirectiveSet::new())
                .await
                .unwrap();
        }

        let count = recorder
            .count(ProvenanceFilter {
                url: Some("https://example.com/a".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_filters() {
        let recorder = ProvenanceRecorder::in_memory();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let entries = [
            ("https://example.com/a", 0, true),
            ("https://example.com/b", 1, false),
            ("https://example.com/a", 2, false),
            ("https://example.com/a", 3, true),
        ];
        for (url, hours, allowed) in entries {
            let record =
                ProvenanceRecord::at(url, base + Duration::hours(hours), allowed, DirectiveSet::new());
            recorder.append(&record).await.unwrap();
        }

        let allowed = recorder
            .query(ProvenanceFilter {
                allowed: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(allowed.len(), 2);

        let window = recorder
            .query(ProvenanceFilter {
                since: Some(base + Duration::hours(1)),
                until: Some(base + Duration::hours(2)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(window.len(), 2);

        let history = recorder.history_for("https://example.com/a", 2).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].checked_at(), base + Duration::hours(3));
        assert_eq!(history[1].checked_at(), base + Duration::hours(2));

        let paged = recorder
            .query(ProvenanceFilter {
                offset: Some(1),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(paged.len(), 2);
        assert_eq!(paged[0].url(), "https://example.com/b");
    }

    #[tokio::test]
    async fn test_from_config_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AuditConfig {
            path: dir.path().join("provenance.json"),
            ..Default::default()
        };
        let recorder = ProvenanceRecorder::from_config(&config);

        recorder
            .record("https://example.com/", true, directives())
            .await
            .unwrap();

        let content = std::fs::read_to_string(&config.path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaced() {
        let config = AuditConfig {
            path: PathBuf::from("/nonexistent-dir/provenance.json"),
            ..Default::default()
        };
        let recorder = ProvenanceRecorder::from_config(&config);

        let result = recorder
            .record("https://example.com/", true, directives())
            .await;
        assert!(matches!(result, Err(AuditError::Open { .. })));
    }
}
