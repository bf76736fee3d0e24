//! Ledger Service - Core protocol orchestration
//!
//! Drives a transition from Drafted to a terminal state: local validation,
//! local signature, counter-signature collection, notary submission. Each
//! run is an independent unit of work; the notary gate's commit log is the
//! only serialization point, so runs against different logical records never
//! contend.

use crate::domain::identity::LocalIdentity;
use crate::domain::run::{ProtocolRun, ProtocolState, RunObserver};
use crate::domain::transition::{RecordTransition, SignedTransition};
use crate::error::{ProtocolError, ProtocolResult};
use crate::events::outgoing::RecordCommittedEvent;
use crate::metrics;
use crate::ports::inbound::RecordLedgerApi;
use crate::ports::outbound::{
    CounterSignOutcome, CounterpartyResolver, CounterpartySession, NotaryGateway, VersionStore,
};
use async_trait::async_trait;
use rl_01_records::{RecordFields, RecordVersion};
use shared_types::{now_millis, LogicalRecordId, Party, Timestamp};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Protocol configuration.
#[derive(Clone, Debug)]
pub struct ProtocolConfig {
    /// How long to wait for the counterparty's answer (milliseconds).
    pub countersign_timeout_ms: u64,
    /// How long to wait for the notary gate's verdict (milliseconds).
    pub notary_timeout_ms: u64,
    /// Clock-skew allowance when checking not-in-the-future rules
    /// (milliseconds). The two nodes stamp with independent wall clocks.
    pub max_clock_skew_ms: u64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            countersign_timeout_ms: 30_000,
            notary_timeout_ms: 30_000,
            max_clock_skew_ms: 2_000,
        }
    }
}

/// Update Protocol implementation.
///
/// Generic over its four driven ports so topologies, transports and notaries
/// can be swapped without touching the state machine.
pub struct LedgerService<R, C, N, V>
where
    R: CounterpartyResolver,
    C: CounterpartySession,
    N: NotaryGateway,
    V: VersionStore,
{
    config: ProtocolConfig,
    identity: Arc<LocalIdentity>,
    resolver: Arc<R>,
    sessions: Arc<C>,
    notary: Arc<N>,
    store: Arc<V>,
    observer: Option<Arc<dyn RunObserver>>,
}

impl<R, C, N, V> LedgerService<R, C, N, V>
where
    R: CounterpartyResolver,
    C: CounterpartySession,
    N: NotaryGateway,
    V: VersionStore,
{
    pub fn new(
        config: ProtocolConfig,
        identity: Arc<LocalIdentity>,
        resolver: Arc<R>,
        sessions: Arc<C>,
        notary: Arc<N>,
        store: Arc<V>,
    ) -> Self {
        Self {
            config,
            identity,
            resolver,
            sessions,
            notary,
            store,
            observer: None,
        }
    }

    /// Attach an observer notified on every run transition.
    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The local party this service signs as.
    pub fn local_party(&self) -> &Party {
        self.identity.party()
    }

    /// Validation clock: wall time plus the configured skew allowance, so a
    /// counterparty's slightly-ahead stamp is not spuriously "in the future".
    fn validation_now(&self) -> Timestamp {
        now_millis() + self.config.max_clock_skew_ms
    }

    fn observer(&self) -> Option<&dyn RunObserver> {
        self.observer.as_deref()
    }

    /// Terminate `run` for `error`: Aborted for infrastructure failures,
    /// Rejected for everything else.
    fn fail(&self, run: &mut ProtocolRun, error: ProtocolError) -> ProtocolError {
        if error.is_transient() {
            run.advance(ProtocolState::Aborted, self.observer());
            metrics::record_aborted();
        } else {
            run.advance(ProtocolState::Rejected, self.observer());
            metrics::record_rejected(error.label());
        }
        tracing::warn!(run = %run.id(), kind = %run.kind(), error = %error, "protocol run failed");
        error
    }

    /// Drive a drafted transition through to commit.
    async fn execute(
        &self,
        mut run: ProtocolRun,
        transition: RecordTransition,
        counterparty: Party,
    ) -> ProtocolResult<RecordVersion> {
        // Drafted -> LocallyValidated. No signature is ever requested for a
        // transition that failed local validation.
        if let Err(violation) = transition.validate(self.validation_now()) {
            return Err(self.fail(&mut run, violation.into()));
        }
        run.advance(ProtocolState::LocallyValidated, self.observer());

        // LocallyValidated -> LocallySigned.
        let message = match transition.signing_message() {
            Ok(message) => message,
            Err(e) => return Err(self.fail(&mut run, e)),
        };
        let mut signed = SignedTransition::new(transition, self.identity.sign(&message));
        run.advance(ProtocolState::LocallySigned, self.observer());

        // LocallySigned -> AwaitingCounterSignature.
        run.advance(ProtocolState::AwaitingCounterSignature, self.observer());
        let countersign_window = Duration::from_millis(self.config.countersign_timeout_ms);
        let outcome = match timeout(
            countersign_window,
            self.sessions.propose_for_countersign(&counterparty, &signed),
        )
        .await
        {
            Err(_) => {
                return Err(self.fail(
                    &mut run,
                    ProtocolError::CounterpartyUnreachable {
                        party: counterparty.to_string(),
                        reason: format!("no answer within {}ms", countersign_window.as_millis()),
                    },
                ))
            }
            Ok(Err(e)) => return Err(self.fail(&mut run, e)),
            Ok(Ok(outcome)) => outcome,
        };

        // AwaitingCounterSignature -> CounterValidated. The counter-signature
        // is re-verified here rather than trusted as delivered.
        match outcome {
            CounterSignOutcome::Declined(reason) => {
                metrics::record_countersign_decline();
                tracing::info!(
                    run = %run.id(),
                    counterparty = %counterparty,
                    %reason,
                    "counterparty declined to sign"
                );
                return Err(self.fail(&mut run, reason));
            }
            CounterSignOutcome::Accepted(signature) => {
                if let Err(e) = signature.verify_as(&message, &counterparty.owning_key) {
                    return Err(self.fail(
                        &mut run,
                        ProtocolError::InvalidSignatures {
                            reason: format!("{counterparty}: {e}"),
                        },
                    ));
                }
                signed.add_signature(signature);
                run.advance(ProtocolState::CounterValidated, self.observer());
            }
        }

        // CounterValidated -> Submitted. From here the run is no longer
        // cancellable; only the gate's verdict decides the outcome.
        run.advance(ProtocolState::Submitted, self.observer());
        let notary_window = Duration::from_millis(self.config.notary_timeout_ms);
        let receipt = match timeout(notary_window, self.notary.submit(&signed)).await {
            Err(_) => {
                return Err(self.fail(
                    &mut run,
                    ProtocolError::FinalityGateUnavailable {
                        reason: format!("no verdict within {}ms", notary_window.as_millis()),
                    },
                ))
            }
            Ok(Err(e)) => return Err(self.fail(&mut run, e)),
            Ok(Ok(receipt)) => receipt,
        };

        // Submitted -> Committed.
        run.advance(ProtocolState::Committed, self.observer());
        metrics::record_committed();
        let produced = signed.transition.produced.clone();
        tracing::info!(
            run = %run.id(),
            kind = %run.kind(),
            id = %produced.id,
            version_ref = %produced.version_ref,
            order = receipt.order,
            "transition committed"
        );

        let event = RecordCommittedEvent {
            version: produced.clone(),
            consumed_version_ref: signed.transition.consumed_ref(),
            order: receipt.order,
        };
        // The transition is durable at the gate regardless of whether the
        // local projection keeps up; a store failure is logged, not returned.
        if let Err(e) = self.store.record_committed(event).await {
            tracing::error!(
                id = %produced.id,
                error = %e,
                "committed transition could not be recorded locally"
            );
        }

        Ok(produced)
    }
}

#[async_trait]
impl<R, C, N, V> RecordLedgerApi for LedgerService<R, C, N, V>
where
    R: CounterpartyResolver,
    C: CounterpartySession,
    N: NotaryGateway,
    V: VersionStore,
{
    async fn issue(&self, fields: RecordFields) -> ProtocolResult<RecordVersion> {
        // Counterparty resolution fails fast, before anything is drafted.
        let counterparty = self
            .resolver
            .counterparty_of(&self.identity.party().name)?;

        let candidate = RecordVersion::issue(
            self.identity.party().clone(),
            counterparty.clone(),
            fields,
        );
        let run = ProtocolRun::new(candidate.kind());
        tracing::debug!(run = %run.id(), id = %candidate.id, "drafting issue");

        self.execute(run, RecordTransition::issue(candidate), counterparty)
            .await
    }

    async fn update(
        &self,
        id: LogicalRecordId,
        fields: RecordFields,
    ) -> ProtocolResult<RecordVersion> {
        // Resolution first: an unrecognized caller organization must not
        // even reach the vault lookup.
        let resolved = self
            .resolver
            .counterparty_of(&self.identity.party().name)?;

        let old = self.store.live_version(id).await?;

        // The session goes to whichever of the old version's two parties is
        // not us; a caller named on neither may not touch the record.
        let me = self.identity.party();
        let counterparty = old
            .other_party(me)
            .ok_or_else(|| ProtocolError::UnauthorizedCaller {
                caller: me.to_string(),
                version_ref: old.version_ref,
            })?
            .clone();
        if counterparty != resolved {
            tracing::warn!(
                expected = %resolved,
                on_record = %counterparty,
                "topology counterparty differs from record counterparty"
            );
        }

        let candidate = old.successor(me.clone(), counterparty.clone(), fields);
        let run = ProtocolRun::new(candidate.kind());
        tracing::debug!(
            run = %run.id(),
            id = %candidate.id,
            consumes = %old.version_ref,
            "drafting update"
        );

        self.execute(run, RecordTransition::update(old, candidate), counterparty)
            .await
    }
}
