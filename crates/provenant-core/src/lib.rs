//! # provenant-core
//!
//! Types shared across the Provenant crates: the recognised directive
//! vocabulary, the [`DirectiveSet`] snapshot, and configuration.

pub mod config;
pub mod directive;

pub use config::{AuditConfig, ConfigError, FetchConfig, ProvenantConfig};
pub use directive::{DEFAULT_AGENT, DirectiveName, DirectiveSet, UnknownDirective};
