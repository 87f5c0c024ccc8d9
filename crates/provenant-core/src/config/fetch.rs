//! Directive document retrieval configuration.

use serde::{Deserialize, Serialize};

/// How the directive document is located and fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path of the directive document relative to the site origin.
    #[serde(default = "default_directive_path")]
    pub directive_path: String,

    /// Directive documents larger than this are treated as unavailable.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            directive_path: default_directive_path(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_directive_path() -> String {
    "/robots.txt".to_string()
}

fn default_max_document_bytes() -> u64 {
    512 * 1024
}
