//! Provenant runtime
//!
//! Wires the pieces together: [`PermissionChecker`] fetches a site's directive
//! document through a [`DirectiveFetcher`], extracts and evaluates it, and
//! appends the outcome to the provenance log before returning the verdict.

pub mod checker;
pub mod error;
pub mod fetch;

pub use checker::{CheckOutcome, PermissionChecker};
pub use error::{CheckError, FetchError};
pub use fetch::{DirectiveFetcher, HttpFetcher, StaticFetcher};
