//! # provenant-audit
//!
//! Append-only provenance log for permission decisions.
//!
//! Every verdict the checker hands out is paired with exactly one
//! [`ProvenanceRecord`] holding the URL, the UTC time of the check, the
//! verdict and the directive snapshot it was derived from. The decision can be
//! audited from the record alone, without re-fetching anything.
//!
//! ## Log Format
//!
//! JSON Lines, one record per line:
//!
//! ```text
//! {"url":"http://127.0.0.1:5000/blog/article1","checked_at":"2024-05-01T12:30:00Z","allowed":true,"directives":{"Allow":"/blog","User-agent":"AI-Training-Crawler"}}
//! ```
//!
//! The file is created if absent and never truncated. Open and write failures
//! are returned as [`AuditError`] rather than ignored.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use provenant_audit::ProvenanceRecorder;
//! use provenant_core::{AuditConfig, DirectiveSet};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let recorder = ProvenanceRecorder::from_config(&AuditConfig::default());
//! recorder
//!     .record("http://127.0.0.1:5000/blog/article1", false, DirectiveSet::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod record;
pub mod recorder;
pub mod storage;

pub use error::AuditError;
pub use record::ProvenanceRecord;
pub use recorder::{ProvenanceFilter, ProvenanceRecorder};
pub use storage::{DualStorage, FileStorage, MemoryStorage, ProvenanceStorage};
