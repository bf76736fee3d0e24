//! In-process counterparty session
//!
//! Runs the responder's counter-signing logic directly against a local
//! identity. Used by tests and single-process deployments where both
//! organizations live in one address space; a production deployment puts a
//! wire transport behind the same port.

use crate::domain::countersign::countersign;
use crate::domain::identity::LocalIdentity;
use crate::domain::transition::SignedTransition;
use crate::error::{ProtocolError, ProtocolResult};
use crate::ports::outbound::{CounterSignOutcome, CounterpartySession};
use async_trait::async_trait;
use shared_types::{now_millis, Party};
use std::sync::Arc;

/// Responder endpoint for one organization.
pub struct LocalCounterparty {
    identity: Arc<LocalIdentity>,
    max_clock_skew_ms: u64,
}

impl LocalCounterparty {
    pub fn new(identity: Arc<LocalIdentity>, max_clock_skew_ms: u64) -> Self {
        Self {
            identity,
            max_clock_skew_ms,
        }
    }
}

#[async_trait]
impl CounterpartySession for LocalCounterparty {
    async fn propose_for_countersign(
        &self,
        counterparty: &Party,
        half_signed: &SignedTransition,
    ) -> ProtocolResult<CounterSignOutcome> {
        // A request addressed to an organization not living here is a
        // transport-level failure, not a decline.
        if counterparty != self.identity.party() {
            return Err(ProtocolError::CounterpartyUnreachable {
                party: counterparty.to_string(),
                reason: format!("no route; local endpoint is {}", self.identity.party()),
            });
        }

        let now = now_millis() + self.max_clock_skew_ms;
        match countersign(half_signed, &self.identity, now) {
            Ok(signature) => Ok(CounterSignOutcome::Accepted(signature)),
            Err(reason) => {
                tracing::info!(
                    responder = %self.identity.party(),
                    %reason,
                    "declining counter-signature request"
                );
                Ok(CounterSignOutcome::Declined(reason))
            }
        }
    }
}
