//! Configuration types for Provenant.
//!
//! Configuration is loaded from a single YAML file (by default `provenant.yaml`).
//! Every field has a default, so an empty file, or no file at all, is a valid
//! configuration.
//!
//! ```yaml
//! agent: AI-Training-Crawler
//! target_url: http://127.0.0.1:5000/blog/article1
//! fetch:
//!   timeout_secs: 5
//!   directive_path: /robots.txt
//!   max_document_bytes: 524288
//! audit:
//!   path: provenance.json
//!   echo: false
//! ```

pub mod audit;
pub mod fetch;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::directive::DEFAULT_AGENT;

pub use audit::AuditConfig;
pub use fetch::FetchConfig;

/// Complete Provenant configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenantConfig {
    /// Agent identifier that must appear in the `User-agent` directive.
    #[serde(default = "default_agent")]
    pub agent: String,

    /// URL checked when none is given on the command line.
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Directive document retrieval.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Provenance log.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for ProvenantConfig {
    fn default() -> Self {
        Self {
            agent: default_agent(),
            target_url: default_target_url(),
            fetch: FetchConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

fn default_agent() -> String {
    DEFAULT_AGENT.to_string()
}

fn default_target_url() -> String {
    "http://127.0.0.1:5000/blog/article1".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Invalid(String),
}

impl ProvenantConfig {
    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every check meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.trim().is_empty() {
            return Err(ConfigError::Invalid("agent must not be empty".into()));
        }
        if self.agent.trim() != self.agent {
            return Err(ConfigError::Invalid(
                "agent must not have surrounding whitespace".into(),
            ));
        }
        let directive_path = &self.fetch.directive_path;
        if !directive_path.starts_with('/') || directive_path.starts_with("//") {
            return Err(ConfigError::Invalid(format!(
                "fetch.directive_path must be an absolute path on the target origin: {}",
                directive_path
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.fetch.max_document_bytes == 0 {
            return Err(ConfigError::Invalid(
                "fetch.max_document_bytes must be greater than zero".into(),
            ));
        }
        if self.audit.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("audit.path must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = ProvenantConfig::default();
        assert_eq!(config.agent, "AI-Training-Crawler");
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.directive_path, "/robots.txt");
        assert_eq!(config.fetch.max_document_bytes, 512 * 1024);
        assert_eq!(config.audit.path, PathBuf::from("provenance.json"));
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ProvenantConfig::from_yaml("").unwrap(), ProvenantConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
agent: OtherBot
audit:
  path: /var/log/provenant/provenance.json
  sync: true
"#;
        let config = ProvenantConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.agent, "OtherBot");
        assert!(config.audit.sync);
        assert!(!config.audit.echo);
        assert_eq!(config.fetch, FetchConfig::default());
    }

    #[test]
    fn test_invalid_directive_path() {
        let err = ProvenantConfig::from_yaml("fetch:\n  directive_path: robots.txt\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_network_path_directive_path_rejected() {
        let yaml = "fetch:\n  directive_path: //evil.example/robots.txt\n";
        let err = ProvenantConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_document_limit_rejected() {
        let err = ProvenantConfig::from_yaml("fetch:\n  max_document_bytes: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_agent_rejected() {
        let err = ProvenantConfig::from_yaml("agent: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_url: https://example.com/docs/").unwrap();

        let config = ProvenantConfig::from_file(file.path()).unwrap();
        assert_eq!(config.target_url, "https://example.com/docs/");
    }

    #[test]
    fn test_demo_config_matches_defaults() {
        let demo = include_str!("../../../../demos/provenant.yaml");
        assert_eq!(ProvenantConfig::from_yaml(demo).unwrap(), ProvenantConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = ProvenantConfig::from_file("/nonexistent/provenant.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
