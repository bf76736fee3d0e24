//! Error types for the Record Model subsystem.

use thiserror::Error;

/// A violated record invariant.
///
/// Carries the specific rule plus the expected and actual values the rule
/// concerns. Always terminal: the caller must correct the input, the
/// transition is never retried automatically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invariant violated: {rule} (expected {expected}, actual {actual})")]
pub struct InvariantViolation {
    /// Name of the violated rule, from [`crate::rules`].
    pub rule: &'static str,
    /// What the rule required.
    pub expected: String,
    /// What the candidate actually carried.
    pub actual: String,
}

impl InvariantViolation {
    pub fn new(rule: &'static str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            rule,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
