//! # rl-02-protocol
//!
//! Update Protocol State Machine for the RIU attested ledger.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Two-party attestation**: propose → local-verify → local-sign →
//!   counter-sign → notarize, for Issue and Update transitions
//! - **Optimistic concurrency**: no locks across network round trips; the
//!   notary gate detects conflicting consumers at commit time
//! - **Zero-trust counter-signing**: the responder independently re-runs the
//!   full invariant validation before signing
//!
//! ## Architecture
//!
//! ```text
//! caller ──fields──→ LedgerService ──half-signed──→ CounterpartySession
//!                         │                               │
//!                         │←──────counter-signature───────┘
//!                         │
//!                         ├── fully-signed ──→ NotaryGateway (finality gate)
//!                         │
//!                         └── RecordCommittedEvent ──→ VersionStore / projection
//! ```
//!
//! ## Protocol States
//!
//! ```text
//! Drafted → LocallyValidated → LocallySigned → AwaitingCounterSignature
//!         → CounterValidated → Submitted → Committed
//! ```
//!
//! `Rejected` terminates any validation step; `Aborted` terminates on
//! infrastructure failure (unreachable counterparty, unavailable gate).
//! A run abandoned before `Submitted` has no side effects; after `Submitted`
//! only the notary's verdict decides the outcome.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::countersign::countersign;
pub use domain::identity::LocalIdentity;
pub use domain::run::{ProtocolRun, ProtocolState, RunObserver};
pub use domain::transition::{RecordTransition, SignedTransition, TransitionCommand};
pub use error::{ProtocolError, ProtocolResult};
pub use events::outgoing::RecordCommittedEvent;
pub use ports::inbound::RecordLedgerApi;
pub use ports::outbound::{
    CommitReceipt, CounterSignOutcome, CounterpartyResolver, CounterpartySession, NotaryGateway,
    VersionStore,
};
pub use service::{LedgerService, ProtocolConfig};
