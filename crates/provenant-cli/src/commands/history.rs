//! `provenant history` - read back the provenance log.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use provenant_audit::{ProvenanceFilter, ProvenanceRecorder};
use provenant_core::ProvenantConfig;

/// Options for `provenant history`.
#[derive(Debug, Default)]
pub struct HistoryOptions {
    pub url: Option<String>,
    pub allowed: Option<bool>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub json: bool,
}

pub async fn run(config: &ProvenantConfig, options: HistoryOptions) -> Result<()> {
    let recorder = ProvenanceRecorder::from_config(&config.audit);
    let filter = ProvenanceFilter {
        url: options.url,
        allowed: options.allowed,
        since: options.since,
        until: options.until,
        limit: options.limit,
        newest_first: true,
        ..Default::default()
    };

    let records = recorder
        .query(filter)
        .await
        .with_context(|| format!("Failed to read provenance log {:?}", config.audit.path))?;
    tracing::debug!(matched = records.len(), "Provenance log read");

    if records.is_empty() {
        eprintln!("No matching records in {:?}", config.audit.path);
        return Ok(());
    }

    for record in &records {
        if options.json {
            println!("{}", record.to_json_line()?);
        } else {
            println!("{}", record.to_log_line());
        }
    }

    Ok(())
}
