//! Driving Ports (API - Inbound)

use crate::error::ProtocolResult;
use async_trait::async_trait;
use rl_01_records::{RecordFields, RecordVersion};
use shared_types::LogicalRecordId;

/// Primary ledger API.
///
/// This is the driving port for the Update Protocol. Callers supply field
/// values; the protocol resolves the counterparty, runs the full
/// sign/counter-sign/notarize sequence, and returns the committed version.
///
/// Both operations suspend while awaiting the counterparty and the notary
/// gate; dropping the future before submission has no side effects.
#[async_trait]
pub trait RecordLedgerApi: Send + Sync {
    /// Issue the first version of a new logical record.
    async fn issue(&self, fields: RecordFields) -> ProtocolResult<RecordVersion>;

    /// Replace the live version of an existing logical record.
    ///
    /// Fails with `NoLiveVersion` when the id has no single live version,
    /// and with `AlreadyConsumed` when a concurrent update won the race;
    /// the latter requires re-deriving from the new live version.
    async fn update(
        &self,
        id: LogicalRecordId,
        fields: RecordFields,
    ) -> ProtocolResult<RecordVersion>;
}
