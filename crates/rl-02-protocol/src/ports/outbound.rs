//! Driven Ports (SPI - Outbound Dependencies)
//!
//! The protocol core consumes these contracts; their implementations are
//! external collaborators (a notary cluster, a wire transport, a vault).
//! Reference in-memory adapters live in [`crate::adapters`].

use crate::domain::transition::SignedTransition;
use crate::error::{ProtocolError, ProtocolResult};
use crate::events::outgoing::RecordCommittedEvent;
use async_trait::async_trait;
use rl_01_records::RecordVersion;
use shared_crypto::PartySignature;
use shared_types::{LogicalRecordId, OrgName, Party, VersionRef};

/// Finality gate.
///
/// The single authority that totally orders version-consuming transitions.
/// Must guarantee: a submission whose consumed set overlaps any previously
/// committed submission's consumed set is always rejected
/// (`AlreadyConsumed`), and acceptance is durable and immediately visible
/// to both named parties.
#[async_trait]
pub trait NotaryGateway: Send + Sync {
    /// Submit a fully-signed transition for ordering.
    async fn submit(&self, transition: &SignedTransition) -> ProtocolResult<CommitReceipt>;
}

/// The notary's acceptance of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Position in the notary's total order.
    pub order: u64,
    /// The version this transition produced.
    pub produced: VersionRef,
    /// The version it retired, if any.
    pub consumed: Option<VersionRef>,
}

/// Session to exactly one counterparty organization.
#[async_trait]
pub trait CounterpartySession: Send + Sync {
    /// Send a half-signed transition for counter-signature.
    ///
    /// Transport failures surface as `CounterpartyUnreachable`; an answered
    /// refusal is `Declined` with the reason the responder derived.
    async fn propose_for_countersign(
        &self,
        counterparty: &Party,
        half_signed: &SignedTransition,
    ) -> ProtocolResult<CounterSignOutcome>;
}

/// The counterparty's answer to a counter-signature request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterSignOutcome {
    /// The responder validated the transition and attested to it.
    Accepted(PartySignature),
    /// The responder refused to sign, with its independently derived reason.
    Declined(ProtocolError),
}

/// Resolves the counterparty for a caller organization.
///
/// The network topology is injected so the protocol stays topology-agnostic;
/// the production deployment is a fixed two-member network.
pub trait CounterpartyResolver: Send + Sync {
    /// The party a record proposed by `caller` must be counter-signed by.
    ///
    /// Fails with `UnknownCounterparty` when `caller` is not a recognized
    /// member organization.
    fn counterparty_of(&self, caller: &OrgName) -> ProtocolResult<Party>;
}

/// Committed-version store (vault).
///
/// Holds this node's view of committed versions: the live-version lookup the
/// update flow needs, plus the projection events it must absorb on commit.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// The single live (unconsumed) version of a logical record.
    ///
    /// Zero or more than one live version is `NoLiveVersion`; more than one
    /// indicates a forked chain and is always fatal.
    async fn live_version(&self, id: LogicalRecordId) -> ProtocolResult<RecordVersion>;

    /// Absorb a committed transition into the store.
    async fn record_committed(&self, event: RecordCommittedEvent) -> ProtocolResult<()>;
}
