//! Two-node in-process network fixture
//!
//! Wires two `LedgerService`s ("NodeA" and "NodeB") against one shared
//! notary and one shared vault, each node's counter-sign requests answered
//! in-process by the other node's identity.

use rl_01_records::{
    CommandFields, ForcedMeasureWindowFields, MeasurementFields, RecordFields,
};
use rl_02_protocol::adapters::{LocalCounterparty, MemoryNotary, MemoryVault, StaticTopology};
use rl_02_protocol::{LedgerService, LocalIdentity, ProtocolConfig};
use shared_crypto::Keypair;
use shared_types::{now_millis, OrgName, Timestamp};
use std::sync::Arc;

pub type Node = LedgerService<StaticTopology, LocalCounterparty, MemoryNotary, MemoryVault>;

pub struct TwoNodeNetwork {
    pub node_a: Arc<Node>,
    pub node_b: Arc<Node>,
    pub notary: Arc<MemoryNotary>,
    pub vault: Arc<MemoryVault>,
}

impl TwoNodeNetwork {
    pub fn start() -> Self {
        let config = ProtocolConfig::default();
        let identity_a = Arc::new(LocalIdentity::new(
            OrgName::new("NodeA", "Milan", "IT"),
            Keypair::generate(),
        ));
        let identity_b = Arc::new(LocalIdentity::new(
            OrgName::new("NodeB", "Milan", "IT"),
            Keypair::generate(),
        ));

        let topology = Arc::new(StaticTopology::new(
            identity_a.party().clone(),
            identity_b.party().clone(),
        ));
        let notary = Arc::new(MemoryNotary::new());
        let vault = Arc::new(MemoryVault::new());

        // Each node's session endpoint answers with the other identity.
        let node_a = Arc::new(LedgerService::new(
            config.clone(),
            identity_a.clone(),
            topology.clone(),
            Arc::new(LocalCounterparty::new(
                identity_b.clone(),
                config.max_clock_skew_ms,
            )),
            notary.clone(),
            vault.clone(),
        ));
        let node_b = Arc::new(LedgerService::new(
            config.clone(),
            identity_b,
            topology,
            Arc::new(LocalCounterparty::new(
                identity_a,
                config.max_clock_skew_ms,
            )),
            notary.clone(),
            vault.clone(),
        ));

        Self {
            node_a,
            node_b,
            notary,
            vault,
        }
    }
}

pub fn past() -> Timestamp {
    now_millis() - 60_000
}

pub fn measurement(payload: &str, correlation_id: &str) -> RecordFields {
    RecordFields::Measurement(MeasurementFields {
        hostname: "riu-01".into(),
        device_address: "00:1B:44:11:3A:B7".into(),
        sample_time: past(),
        payload: payload.into(),
        correlation_id: correlation_id.into(),
    })
}

pub fn command(status: &str, payload: &str) -> RecordFields {
    RecordFields::Command(CommandFields {
        hostname: "riu-01".into(),
        device_address: "00:1B:44:11:3A:B7".into(),
        issue_time: past(),
        command_payload: payload.into(),
        status: status.into(),
    })
}

pub fn forced_window(payload: &str, start: Timestamp, end: Timestamp) -> RecordFields {
    RecordFields::ForcedMeasureWindow(ForcedMeasureWindowFields {
        hostname: "riu-01".into(),
        device_address: "00:1B:44:11:3A:B7".into(),
        requested_at: past(),
        payload: payload.into(),
        window_start: start,
        window_end: end,
    })
}
