//! `provenant check` - decide whether the crawler may access a URL.
//!
//! Prints the verdict and appends one provenance record. The exit status is
//! zero for both verdicts; it is non-zero only when the URL is invalid or the
//! record could not be written.

use anyhow::{Context, Result};
use provenant_core::ProvenantConfig;
use provenant_runtime::{CheckOutcome, PermissionChecker};

pub async fn run(config: &ProvenantConfig, url: Option<String>, json: bool) -> Result<()> {
    let url = url.unwrap_or_else(|| config.target_url.clone());
    tracing::debug!(
        url = %url,
        agent = %config.agent,
        log = %config.audit.path.display(),
        "Running permission check"
    );

    let checker = PermissionChecker::from_config(config).context("Failed to set up checker")?;
    let outcome = checker
        .check(&url)
        .await
        .with_context(|| format!("Permission check for {} failed", url))?;

    println!("{}", render(&url, &outcome, json)?);
    Ok(())
}

fn render(url: &str, outcome: &CheckOutcome, json: bool) -> Result<String> {
    if json {
        return Ok(outcome.record.to_json_line()?);
    }
    Ok(format!("AI-Training permission for {}: {}", url, outcome.is_allowed()))
}
