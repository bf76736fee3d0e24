//! In-memory committed-version store
//!
//! Reference vault: absorbs committed-record events and answers the
//! live-version lookup plus the projection queries (latest live record per
//! hostname or device address, full history per logical id).

use crate::error::{ProtocolError, ProtocolResult};
use crate::events::outgoing::RecordCommittedEvent;
use crate::ports::outbound::VersionStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use rl_01_records::{RecordKind, RecordVersion};
use shared_types::{LogicalRecordId, VersionRef};
use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct VaultState {
    /// All committed versions per logical record, in commit order.
    history: HashMap<LogicalRecordId, Vec<RecordVersion>>,
    /// Version references retired by a committed update.
    consumed: HashSet<VersionRef>,
    /// Projection indexes: latest logical record per (kind, key).
    by_hostname: HashMap<(RecordKind, String), LogicalRecordId>,
    by_device: HashMap<(RecordKind, String), LogicalRecordId>,
}

impl VaultState {
    fn live_of(&self, id: LogicalRecordId) -> Vec<&RecordVersion> {
        self.history
            .get(&id)
            .map(|versions| {
                versions
                    .iter()
                    .filter(|v| !self.consumed.contains(&v.version_ref))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Single-process vault and query projection.
#[derive(Default)]
pub struct MemoryVault {
    state: RwLock<VaultState>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest live record of `kind` for a device hostname.
    pub fn live_by_hostname(&self, kind: RecordKind, hostname: &str) -> Option<RecordVersion> {
        let state = self.state.read();
        let id = *state.by_hostname.get(&(kind, hostname.to_string()))?;
        state.live_of(id).first().map(|v| (*v).clone())
    }

    /// Latest live record of `kind` for a device MAC address.
    pub fn live_by_device(&self, kind: RecordKind, device_address: &str) -> Option<RecordVersion> {
        let state = self.state.read();
        let id = *state.by_device.get(&(kind, device_address.to_string()))?;
        state.live_of(id).first().map(|v| (*v).clone())
    }

    /// Every committed version of one logical record, oldest first.
    pub fn history(&self, id: LogicalRecordId) -> Vec<RecordVersion> {
        self.state.read().history.get(&id).cloned().unwrap_or_default()
    }

    /// Number of live versions for one logical record.
    pub fn live_count(&self, id: LogicalRecordId) -> usize {
        self.state.read().live_of(id).len()
    }
}

#[async_trait]
impl VersionStore for MemoryVault {
    async fn live_version(&self, id: LogicalRecordId) -> ProtocolResult<RecordVersion> {
        let state = self.state.read();
        let live = state.live_of(id);
        match live.as_slice() {
            [single] => Ok((*single).clone()),
            _ => Err(ProtocolError::NoLiveVersion {
                id,
                found: live.len(),
            }),
        }
    }

    async fn record_committed(&self, event: RecordCommittedEvent) -> ProtocolResult<()> {
        let mut state = self.state.write();
        if let Some(consumed_ref) = event.consumed_version_ref {
            state.consumed.insert(consumed_ref);
        }

        let kind = event.kind();
        let id = event.id();
        let version = event.version;
        state
            .by_hostname
            .insert((kind, version.fields.hostname().to_string()), id);
        state
            .by_device
            .insert((kind, version.fields.device_address().to_string()), id);
        state.history.entry(id).or_default().push(version);
        Ok(())
    }
}
