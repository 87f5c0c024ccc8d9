//! Provenance record type.
//!
//! One record is written per permission decision. Records are immutable: the
//! fields are private and only readable through accessors.

use chrono::{DateTime, SecondsFormat, Utc};
use provenant_core::DirectiveSet;
use serde::{Deserialize, Serialize};

/// A permission decision and the directives that produced it.
///
/// Serialised as one JSON object with the fields `url`, `checked_at`,
/// `allowed` and `directives`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    url: String,
    checked_at: DateTime<Utc>,
    allowed: bool,
    directives: DirectiveSet,
}

impl ProvenanceRecord {
    /// Create a record stamped with the current UTC time.
    pub fn new(url: impl Into<String>, allowed: bool, directives: DirectiveSet) -> Self {
        Self::at(url, Utc::now(), allowed, directives)
    }

    /// Create a record with an explicit timestamp.
    pub fn at(
        url: impl Into<String>,
        checked_at: DateTime<Utc>,
        allowed: bool,
        directives: DirectiveSet,
    ) -> Self {
        Self {
            url: url.into(),
            checked_at,
            allowed,
            directives,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }

    pub fn allowed(&self) -> bool {
        self.allowed
    }

    /// The directive snapshot the decision was made from.
    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    /// Serialise as a single JSON line, without the trailing newline.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Format the record as a human-readable log line.
    ///
    /// Format: `[timestamp] ALLOWED|DENIED url=... User-agent=... Allow=...`
    pub fn to_log_line(&self) -> String {
        let mut line = format!(
            "[{}] {} url={}",
            self.checked_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            if self.allowed { "ALLOWED" } else { "DENIED" },
            self.url,
        );

        for (name, value) in self.directives.iter() {
            line.push_str(&format!(" {}=\"{}\"", name, value));
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use provenant_core::DirectiveName;

    fn sample_directives() -> DirectiveSet {
        DirectiveSet::new()
            .with(DirectiveName::UserAgent, "AI-Training-Crawler")
            .with(DirectiveName::Allow, "/blog")
    }

    #[test]
    fn test_json_field_names() {
        let checked_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let record = ProvenanceRecord::at(
            "http://127.0.0.1:5000/blog/article1",
            checked_at,
            true,
            sample_directives(),
        );

        let value: serde_json::Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();
        assert_eq!(value["url"], "http://127.0.0.1:5000/blog/article1");
        assert_eq!(value["checked_at"], "2024-05-01T12:30:00Z");
        assert_eq!(value["allowed"], true);
        assert_eq!(value["directives"]["Allow"], "/blog");
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_round_trip() {
        let record = ProvenanceRecord::new("https://example.com/a", false, sample_directives());
        let line = record.to_json_line().unwrap();
        assert!(!line.contains('\n'));

        let back: ProvenanceRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_timestamp_is_utc_now() {
        let before = Utc::now();
        let record = ProvenanceRecord::new("https://example.com/", false, DirectiveSet::new());
        let after = Utc::now();
        assert!(record.checked_at() >= before && record.checked_at() <= after);
    }

    #[test]
    fn test_to_log_line() {
        let checked_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let record = ProvenanceRecord::at("https://example.com/x", checked_at, false, sample_directives());

        let line = record.to_log_line();
        assert!(line.starts_with("[2024-05-01T12:30:00Z] DENIED"));
        assert!(line.contains("url=https://example.com/x"));
        assert!(line.contains("User-agent=\"AI-Training-Crawler\""));
        assert!(line.contains("Allow=\"/blog\""));
    }
}
