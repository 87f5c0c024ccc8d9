//! CLI command implementations for Provenant.

pub mod check;
pub mod directives;
pub mod history;

use anyhow::{Context, Result};
use provenant_core::ProvenantConfig;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory when no
/// `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "provenant.yaml";

/// Resolve the effective configuration.
///
/// An explicit path must exist. Without one, `provenant.yaml` in the working
/// directory is used if present, otherwise the built-in defaults. A `--log`
/// override replaces `audit.path` either way.
pub fn load_config(explicit: Option<&Path>, log_override: Option<PathBuf>) -> Result<ProvenantConfig> {
    let mut config = match explicit {
        Some(path) => {
            tracing::debug!(config = %path.display(), "Loading configuration");
            ProvenantConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))?
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::debug!(config = DEFAULT_CONFIG_FILE, "Loading configuration");
            ProvenantConfig::from_file(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG_FILE))?
        }
        None => {
            tracing::debug!("No configuration file, using defaults");
            ProvenantConfig::default()
        }
    };

    if let Some(log) = log_override {
        tracing::debug!(log = %log.display(), "Provenance log overridden");
        config.audit.path = log;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_config_and_log_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "agent: OtherBot\naudit:\n  path: from-file.json").unwrap();

        let config = load_config(Some(file.path()), None).unwrap();
        assert_eq!(config.agent, "OtherBot");
        assert_eq!(config.audit.path, PathBuf::from("from-file.json"));

        let config = load_config(Some(file.path()), Some(PathBuf::from("override.json"))).unwrap();
        assert_eq!(config.audit.path, PathBuf::from("override.json"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        assert!(load_config(Some(Path::new("/nonexistent/provenant.yaml")), None).is_err());
    }
}
