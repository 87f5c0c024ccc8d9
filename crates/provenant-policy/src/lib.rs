//! Provenant policy
//!
//! Decides whether the training crawler may fetch a path, based only on the
//! directives the site publishes:
//!
//! - [`extractor`] reduces a directive document to a [`DirectiveSet`]
//! - [`evaluator`] applies the default-deny policy to a set and a path
//!
//! Neither step performs I/O or returns errors. Malformed input degrades to
//! fewer directives, and fewer directives degrade to a denial.
//!
//! ```rust
//! use provenant_policy::{PermissionEvaluator, extract_directives};
//!
//! let directives = extract_directives("User-agent: AI-Training-Crawler\nAllow: /blog\n");
//! let evaluator = PermissionEvaluator::default();
//! assert!(evaluator.is_allowed(&directives, "/blog/article1"));
//! assert!(!evaluator.is_allowed(&directives, "/private/secret"));
//! ```
//!
//! [`DirectiveSet`]: provenant_core::DirectiveSet

pub mod evaluator;
pub mod extractor;

pub use evaluator::{Decision, DecisionRule, PermissionEvaluator, Verdict};
pub use extractor::{DirectiveExtractor, extract_directives};
