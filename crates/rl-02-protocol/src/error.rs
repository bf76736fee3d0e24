//! Error types for the Update Protocol subsystem.
//!
//! Invariant violations and authorization failures are terminal: the caller
//! must correct the input and start a fresh attempt. Infrastructure failures
//! are transient and safe to retry from the Drafted step. `AlreadyConsumed`
//! is terminal for the attempt: the caller must re-derive from the new live
//! version before resubmitting.

use rl_01_records::InvariantViolation;
use shared_types::{LogicalRecordId, VersionRef};
use thiserror::Error;

/// Update Protocol errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A record invariant was violated, locally or by the counterparty's
    /// independent re-validation.
    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),

    /// Caller identity is not one of the two named parties on the version.
    #[error("Unauthorized caller: {caller} is not a named party on version {version_ref}")]
    UnauthorizedCaller {
        caller: String,
        version_ref: VersionRef,
    },

    /// Caller organization is not a recognized network member.
    #[error("Unknown counterparty for organization {organisation}")]
    UnknownCounterparty { organisation: String },

    /// Live-version lookup found zero or more than one candidate.
    ///
    /// More than one live version indicates a forked chain and is always
    /// fatal, never retried.
    #[error("No single live version for record {id}: found {found}")]
    NoLiveVersion { id: LogicalRecordId, found: usize },

    /// The consumed version was already retired by a committed transition.
    #[error("Version already consumed: {version_ref}")]
    AlreadyConsumed { version_ref: VersionRef },

    /// The notary gate refused the submitted signature set.
    #[error("Invalid signatures on submitted transition: {reason}")]
    InvalidSignatures { reason: String },

    /// Canonical encoding of the transition failed.
    #[error("Canonical encoding failed: {reason}")]
    EncodingFailed { reason: String },

    /// The counterparty did not answer within the configured window.
    #[error("Counterparty {party} unreachable: {reason}")]
    CounterpartyUnreachable { party: String, reason: String },

    /// The notary gate did not answer within the configured window.
    #[error("Finality gate unavailable: {reason}")]
    FinalityGateUnavailable { reason: String },
}

impl ProtocolError {
    /// Whether the whole Drafted attempt may safely be retried as-is.
    ///
    /// Everything else requires corrected input or a re-derived candidate.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProtocolError::CounterpartyUnreachable { .. }
                | ProtocolError::FinalityGateUnavailable { .. }
        )
    }

    /// Stable label for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            ProtocolError::InvariantViolation(_) => "invariant_violation",
            ProtocolError::UnauthorizedCaller { .. } => "unauthorized_caller",
            ProtocolError::UnknownCounterparty { .. } => "unknown_counterparty",
            ProtocolError::NoLiveVersion { .. } => "no_live_version",
            ProtocolError::AlreadyConsumed { .. } => "already_consumed",
            ProtocolError::InvalidSignatures { .. } => "invalid_signatures",
            ProtocolError::EncodingFailed { .. } => "encoding_failed",
            ProtocolError::CounterpartyUnreachable { .. } => "counterparty_unreachable",
            ProtocolError::FinalityGateUnavailable { .. } => "finality_gate_unavailable",
        }
    }
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
