//! Directive vocabulary and the per-evaluation directive snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Agent identifier the crawler announces and expects to find in `User-agent`.
pub const DEFAULT_AGENT: &str = "AI-Training-Crawler";

/// The directive names this system recognises.
///
/// Matching is case-sensitive; every other name in a directive document is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectiveName {
    /// `User-agent`: which agent the document addresses.
    UserAgent,
    /// `Allow`: path prefix the agent may access.
    Allow,
    /// `Disallow`: path prefix the agent must not access.
    Disallow,
}

impl DirectiveName {
    /// All recognised names, in rendering order.
    pub const ALL: [DirectiveName; 3] = [Self::UserAgent, Self::Allow, Self::Disallow];

    /// The literal name as it appears in a directive document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserAgent => "User-agent",
            Self::Allow => "Allow",
            Self::Disallow => "Disallow",
        }
    }
}

impl fmt::Display for DirectiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the recognised directive names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised directive name: {0}")]
pub struct UnknownDirective(pub String);

impl FromStr for DirectiveName {
    type Err = UnknownDirective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownDirective(s.to_string()))
    }
}

/// Normalised mapping of directive name to value for one evaluation.
///
/// Each name holds a single value. Inserting a name that is already present
/// replaces the previous value, so a document that repeats `Disallow` keeps only
/// its last `Disallow` line.
///
/// Serialises as a JSON object keyed by the literal directive names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectiveSet {
    entries: BTreeMap<String, String>,
}

impl DirectiveSet {
    /// Create an empty directive set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a directive, replacing any earlier value for the same name.
    pub fn insert(&mut self, name: DirectiveName, value: impl Into<String>) {
        self.entries.insert(name.as_str().to_string(), value.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, name: DirectiveName, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Value of a directive, if present.
    pub fn get(&self, name: DirectiveName) -> Option<&str> {
        self.entries.get(name.as_str()).map(String::as_str)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.get(DirectiveName::UserAgent)
    }

    pub fn allow(&self) -> Option<&str> {
        self.get(DirectiveName::Allow)
    }

    pub fn disallow(&self) -> Option<&str> {
        self.get(DirectiveName::Disallow)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    ///
    /// Entries whose key is not a recognised name (possible only for sets
    /// deserialised from hand-edited logs) are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (DirectiveName, &str)> + '_ {
        self.entries
            .iter()
            .filter_map(|(k, v)| k.parse().ok().map(|name| (name, v.as_str())))
    }

    /// Render the set back into directive document text, one `Name: value` per line.
    pub fn to_directive_text(&self) -> String {
        let mut out = String::new();
        for name in DirectiveName::ALL {
            if let Some(value) = self.get(name) {
                out.push_str(name.as_str());
                out.push_str(": ");
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }
}
