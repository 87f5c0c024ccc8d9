//! Permission evaluation.
//!
//! A closed-world, default-deny policy over a [`DirectiveSet`]:
//!
//! 1. `User-agent` must equal the configured agent exactly, otherwise deny
//! 2. A non-empty `Disallow` prefix of the path denies (checked before `Allow`)
//! 3. A non-empty `Allow` prefix of the path allows
//! 4. Anything else denies
//!
//! Prefixes are compared on the raw path string with no segment awareness, so
//! `Allow: /blog` also covers `/blogger`.

use provenant_core::{DEFAULT_AGENT, DirectiveSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Allowed,
    Denied,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}

impl From<bool> for Verdict {
    fn from(allowed: bool) -> Self {
        if allowed { Verdict::Allowed } else { Verdict::Denied }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Allowed => write!(f, "ALLOWED"),
            Verdict::Denied => write!(f, "DENIED"),
        }
    }
}

/// Which step of the policy settled the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// `User-agent` absent or not the configured agent.
    AgentMismatch,
    /// The `Disallow` prefix matched.
    Disallowed,
    /// The `Allow` prefix matched.
    Allowed,
    /// Neither prefix matched.
    NoMatchingRule,
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgentMismatch => write!(f, "agent_mismatch"),
            Self::Disallowed => write!(f, "disallowed"),
            Self::Allowed => write!(f, "allowed"),
            Self::NoMatchingRule => write!(f, "no_matching_rule"),
        }
    }
}

/// Result of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub rule: DecisionRule,
}

impl Decision {
    fn deny(rule: DecisionRule) -> Self {
        Self { verdict: Verdict::Denied, rule }
    }

    pub fn is_allowed(&self) -> bool {
        self.verdict.is_allowed()
    }
}

/// Evaluates directive sets for one agent identifier.
///
/// Stateless apart from the agent name; share it freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionEvaluator {
    agent: String,
}

impl Default for PermissionEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT)
    }
}

impl PermissionEvaluator {
    pub fn new(agent: impl Into<String>) -> Self {
        Self { agent: agent.into() }
    }

    /// The agent identifier this evaluator checks for.
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Evaluate `path` against `directives`, reporting the deciding rule.
    pub fn evaluate(&self, directives: &DirectiveSet, path: &str) -> Decision {
        if directives.user_agent() != Some(self.agent.as_str()) {
            return Decision::deny(DecisionRule::AgentMismatch);
        }

        if prefix_matches(directives.disallow(), path) {
            return Decision::deny(DecisionRule::Disallowed);
        }

        if prefix_matches(directives.allow(), path) {
            return Decision {
                verdict: Verdict::Allowed,
                rule: DecisionRule::Allowed,
            };
        }

        Decision::deny(DecisionRule::NoMatchingRule)
    }

    /// Evaluate `path` against `directives`, returning only the verdict.
    pub fn is_allowed(&self, directives: &DirectiveSet, path: &str) -> bool {
        self.evaluate(directives, path).is_allowed()
    }
}

// An empty prefix would match every path, so it counts as no directive.
fn prefix_matches(prefix: Option<&str>, path: &str) -> bool {
    match prefix {
        Some(prefix) if !prefix.is_empty() => path.starts_with(prefix),
        _ => false,
    }
}
