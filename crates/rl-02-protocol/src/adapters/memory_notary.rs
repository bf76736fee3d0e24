//! In-memory notary gate
//!
//! Reference implementation of the finality-gate contract: verifies the
//! full signature set, then commits under a single lock that enforces
//! consumed-version exclusivity. The lock is the total order; whichever of
//! two racing submissions acquires it first wins, the other observes
//! `AlreadyConsumed`.

use crate::domain::transition::SignedTransition;
use crate::error::{ProtocolError, ProtocolResult};
use crate::ports::outbound::{CommitReceipt, NotaryGateway};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::VersionRef;
use std::collections::HashSet;

#[derive(Default)]
struct NotaryLog {
    /// Every version reference retired by a committed transition.
    consumed: HashSet<VersionRef>,
    /// Committed transitions in commit order.
    committed: Vec<SignedTransition>,
}

/// Single-process notary gate.
#[derive(Default)]
pub struct MemoryNotary {
    log: Mutex<NotaryLog>,
}

impl MemoryNotary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed transitions.
    pub fn committed_count(&self) -> usize {
        self.log.lock().committed.len()
    }

    /// Snapshot of the commit log, in total order.
    pub fn commit_log(&self) -> Vec<SignedTransition> {
        self.log.lock().committed.clone()
    }
}

#[async_trait]
impl NotaryGateway for MemoryNotary {
    async fn submit(&self, transition: &SignedTransition) -> ProtocolResult<CommitReceipt> {
        // Signatures are checked outside the lock; exclusivity inside it.
        transition.verify_complete()?;

        let mut log = self.log.lock();
        if let Some(consumed_ref) = transition.transition.consumed_ref() {
            if !log.consumed.insert(consumed_ref) {
                tracing::debug!(version_ref = %consumed_ref, "double-consume rejected");
                return Err(ProtocolError::AlreadyConsumed {
                    version_ref: consumed_ref,
                });
            }
        }
        log.committed.push(transition.clone());
        let order = log.committed.len() as u64;

        Ok(CommitReceipt {
            order,
            produced: transition.transition.produced.version_ref,
            consumed: transition.transition.consumed_ref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::LocalIdentity;
    use crate::domain::transition::RecordTransition;
    use rl_01_records::{MeasurementFields, RecordFields, RecordVersion};
    use shared_crypto::Keypair;
    use shared_types::OrgName;

    fn identity(org: &str) -> LocalIdentity {
        LocalIdentity::new(OrgName::new(org, "Milan", "IT"), Keypair::generate())
    }

    fn fields(payload: &str) -> RecordFields {
        RecordFields::Measurement(MeasurementFields {
            hostname: "riu-01".into(),
            device_address: "00:1B:44:11:3A:B7".into(),
            sample_time: 1_700_000_000_000,
            payload: payload.into(),
            correlation_id: String::new(),
        })
    }

    fn fully_signed(
        a: &LocalIdentity,
        b: &LocalIdentity,
        transition: RecordTransition,
    ) -> SignedTransition {
        let message = transition.signing_message().unwrap();
        let mut signed = SignedTransition::new(transition, a.sign(&message));
        signed.add_signature(b.sign(&message));
        signed
    }

    #[tokio::test]
    async fn test_commit_orders_submissions() {
        let a = identity("NodeA");
        let b = identity("NodeB");
        let notary = MemoryNotary::new();

        for _ in 0..3 {
            let v = RecordVersion::issue(a.party().clone(), b.party().clone(), fields(""));
            let signed = fully_signed(&a, &b, RecordTransition::issue(v));
            notary.submit(&signed).await.unwrap();
        }
        assert_eq!(notary.committed_count(), 3);
        let last = notary.commit_log().pop().unwrap();
        let receipt = {
            // Orders are 1-based and dense.
            let v = RecordVersion::issue(a.party().clone(), b.party().clone(), fields(""));
            let signed = fully_signed(&a, &b, RecordTransition::issue(v));
            notary.submit(&signed).await.unwrap()
        };
        assert_eq!(receipt.order, 4);
        assert_ne!(last.transition.produced.version_ref, receipt.produced);
    }

    #[tokio::test]
    async fn test_rejects_half_signed_submission() {
        let a = identity("NodeA");
        let b = identity("NodeB");
        let notary = MemoryNotary::new();

        let v = RecordVersion::issue(a.party().clone(), b.party().clone(), fields(""));
        let transition = RecordTransition::issue(v);
        let message = transition.signing_message().unwrap();
        let half = SignedTransition::new(transition, a.sign(&message));

        assert!(matches!(
            notary.submit(&half).await,
            Err(ProtocolError::InvalidSignatures { .. })
        ));
        assert_eq!(notary.committed_count(), 0);
    }

    #[tokio::test]
    async fn test_double_consume_rejected() {
        let a = identity("NodeA");
        let b = identity("NodeB");
        let notary = MemoryNotary::new();

        let v1 = RecordVersion::issue(a.party().clone(), b.party().clone(), fields(""));
        notary
            .submit(&fully_signed(&a, &b, RecordTransition::issue(v1.clone())))
            .await
            .unwrap();

        let mk_update = |payload: &str| {
            let next = v1.successor(
                v1.first_party.clone(),
                v1.second_party.clone(),
                fields(payload),
            );
            fully_signed(&a, &b, RecordTransition::update(v1.clone(), next))
        };

        notary.submit(&mk_update("<data>1</data>")).await.unwrap();
        let err = notary.submit(&mk_update("<data>2</data>")).await.unwrap_err();
        assert_eq!(
            err,
            ProtocolError::AlreadyConsumed {
                version_ref: v1.version_ref
            }
        );
        assert_eq!(notary.committed_count(), 2);
    }
}
