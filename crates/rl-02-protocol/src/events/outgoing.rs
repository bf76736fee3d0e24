//! Outgoing events for the Update Protocol.

use rl_01_records::{RecordKind, RecordVersion};
use serde::{Deserialize, Serialize};
use shared_types::{LogicalRecordId, Timestamp, VersionRef};

/// Emitted once per committed transition.
///
/// Everything a query projection needs to index by hostname, device address
/// and consumed/live status: the produced version in full, the reference it
/// retired, and the notary's position in the total order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCommittedEvent {
    /// The version this transition produced (now live).
    pub version: RecordVersion,
    /// The version it retired; `None` for an Issue.
    pub consumed_version_ref: Option<VersionRef>,
    /// Position in the notary's total order.
    pub order: u64,
}

impl RecordCommittedEvent {
    pub fn kind(&self) -> RecordKind {
        self.version.kind()
    }

    pub fn id(&self) -> LogicalRecordId {
        self.version.id
    }

    pub fn version_ref(&self) -> VersionRef {
        self.version.version_ref
    }

    pub fn recorded_at(&self) -> Timestamp {
        self.version.recorded_at
    }
}
