//! Record version entity
//!
//! One logical record is a chain of versions sharing a [`LogicalRecordId`];
//! each version is named by a fresh [`VersionRef`] and jointly owned by the
//! two parties that attested to it.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{now_millis, LogicalRecordId, Party, Timestamp, VersionRef};
use std::fmt;

/// The four telemetry record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Periodic device measurement (XML payload filled in on update).
    Measurement,
    /// Operator command sent to a device, with lifecycle status.
    Command,
    /// A window in which a device is forced to measure on demand.
    ForcedMeasureWindow,
    /// Raw flow-computer memory dump.
    FlowComputerBlob,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Measurement => "Measurement",
            RecordKind::Command => "Command",
            RecordKind::ForcedMeasureWindow => "ForcedMeasureWindow",
            RecordKind::FlowComputerBlob => "FlowComputerBlob",
        };
        f.write_str(name)
    }
}

/// Measurement payload fields.
///
/// `payload` and `correlation_id` must be empty at issue time; an update
/// fills both in (the correlation id ties the sample to the acquisition
/// request that produced it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementFields {
    pub hostname: String,
    pub device_address: String,
    pub sample_time: Timestamp,
    pub payload: String,
    pub correlation_id: String,
}

/// Command payload fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFields {
    pub hostname: String,
    pub device_address: String,
    pub issue_time: Timestamp,
    pub command_payload: String,
    pub status: String,
}

/// Forced-measure window payload fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedMeasureWindowFields {
    pub hostname: String,
    pub device_address: String,
    pub requested_at: Timestamp,
    pub payload: String,
    pub window_start: Timestamp,
    pub window_end: Timestamp,
}

/// Flow-computer binary dump fields.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowComputerBlobFields {
    pub hostname: String,
    pub device_address: String,
    pub captured_at: Timestamp,
    #[serde_as(as = "Bytes")]
    pub binary_payload: Vec<u8>,
}

/// Kind-specific payload of a record version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordFields {
    Measurement(MeasurementFields),
    Command(CommandFields),
    ForcedMeasureWindow(ForcedMeasureWindowFields),
    FlowComputerBlob(FlowComputerBlobFields),
}

impl RecordFields {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordFields::Measurement(_) => RecordKind::Measurement,
            RecordFields::Command(_) => RecordKind::Command,
            RecordFields::ForcedMeasureWindow(_) => RecordKind::ForcedMeasureWindow,
            RecordFields::FlowComputerBlob(_) => RecordKind::FlowComputerBlob,
        }
    }

    /// Hostname of the field device this record concerns.
    pub fn hostname(&self) -> &str {
        match self {
            RecordFields::Measurement(f) => &f.hostname,
            RecordFields::Command(f) => &f.hostname,
            RecordFields::ForcedMeasureWindow(f) => &f.hostname,
            RecordFields::FlowComputerBlob(f) => &f.hostname,
        }
    }

    /// MAC address of the field device this record concerns.
    pub fn device_address(&self) -> &str {
        match self {
            RecordFields::Measurement(f) => &f.device_address,
            RecordFields::Command(f) => &f.device_address,
            RecordFields::ForcedMeasureWindow(f) => &f.device_address,
            RecordFields::FlowComputerBlob(f) => &f.device_address,
        }
    }
}

/// One version of a logical record.
///
/// Versions are immutable once created. An update never mutates a version;
/// it consumes the live one and produces a successor carrying the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordVersion {
    /// Stable identity shared by every version of this logical record.
    pub id: LogicalRecordId,
    /// Unique reference to this particular version.
    pub version_ref: VersionRef,
    /// The party that proposed this version.
    pub first_party: Party,
    /// The counterparty that counter-signed it.
    pub second_party: Party,
    /// Wall-clock stamp assigned by the issuing party at creation.
    pub recorded_at: Timestamp,
    /// Kind-specific payload.
    pub fields: RecordFields,
}

impl RecordVersion {
    /// Construct the first version of a new logical record.
    ///
    /// Assigns a fresh id and version reference and stamps `recorded_at`
    /// with the proposer's wall clock.
    pub fn issue(first_party: Party, second_party: Party, fields: RecordFields) -> Self {
        Self {
            id: LogicalRecordId::random(),
            version_ref: VersionRef::random(),
            first_party,
            second_party,
            recorded_at: now_millis(),
            fields,
        }
    }

    /// Construct the successor of an existing version.
    ///
    /// Keeps the logical id, assigns a fresh version reference, and names
    /// the proposing party first (the roles may swap between versions when
    /// the other organization proposes the update).
    pub fn successor(&self, first_party: Party, second_party: Party, fields: RecordFields) -> Self {
        Self {
            id: self.id,
            version_ref: VersionRef::random(),
            first_party,
            second_party,
            recorded_at: now_millis(),
            fields,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.fields.kind()
    }

    /// The two parties jointly owning this version.
    pub fn participants(&self) -> [&Party; 2] {
        [&self.first_party, &self.second_party]
    }

    pub fn is_participant(&self, party: &Party) -> bool {
        &self.first_party == party || &self.second_party == party
    }

    /// The named party that is not `caller`, or `None` when the caller is
    /// not a participant of this version.
    ///
    /// Only a version's two named parties may mutate or retire it, so a
    /// `None` here is an authorization failure at the protocol layer.
    pub fn other_party(&self, caller: &Party) -> Option<&Party> {
        if caller == &self.first_party {
            Some(&self.second_party)
        } else if caller == &self.second_party {
            Some(&self.first_party)
        } else {
            None
        }
    }
}
