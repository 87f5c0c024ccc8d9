//! Provenance log configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the provenance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Path of the JSON Lines log file. Created on first write, never truncated.
    #[serde(default = "default_log_path")]
    pub path: PathBuf,

    /// Also emit each record as an `info` event on the log output (stderr).
    #[serde(default)]
    pub echo: bool,

    /// Call `sync_data` after each append.
    #[serde(default)]
    pub sync: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            echo: false,
            sync: false,
        }
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("provenance.json")
}
