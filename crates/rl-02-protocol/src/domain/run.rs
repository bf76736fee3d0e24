//! Protocol run state
//!
//! Each issue/update attempt is an independent run through an explicit state
//! machine. The run records every transition it takes; an optional observer
//! hook receives them as they happen, decoupled from any concurrency
//! primitive.

use rl_01_records::RecordKind;
use shared_types::{now_millis, Timestamp};
use std::fmt;
use uuid::Uuid;

/// States of one protocol run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolState {
    /// Candidate version constructed, nothing checked yet.
    Drafted,
    /// Local invariant validation passed.
    LocallyValidated,
    /// Proposer signature attached.
    LocallySigned,
    /// Half-signed transition sent to the counterparty.
    AwaitingCounterSignature,
    /// Counter-signature received and verified.
    CounterValidated,
    /// Fully-signed transition handed to the notary gate.
    Submitted,
    /// Terminal success: the gate durably ordered the transition.
    Committed,
    /// Terminal failure at a validation step (invariant or signature).
    Rejected,
    /// Terminal failure on infrastructure (counterparty or gate unreachable).
    Aborted,
}

impl ProtocolState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProtocolState::Committed | ProtocolState::Rejected | ProtocolState::Aborted
        )
    }
}

impl fmt::Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Observer hook for run transitions.
///
/// Implementations must be cheap and non-blocking; the run advances on the
/// caller's task.
pub trait RunObserver: Send + Sync {
    fn on_transition(&self, run: &ProtocolRun, from: ProtocolState, to: ProtocolState);
}

/// One attempt at an Issue or Update transition.
pub struct ProtocolRun {
    id: Uuid,
    kind: RecordKind,
    state: ProtocolState,
    history: Vec<(ProtocolState, Timestamp)>,
}

impl ProtocolRun {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            state: ProtocolState::Drafted,
            history: vec![(ProtocolState::Drafted, now_millis())],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// Every state this run has passed through, in order.
    pub fn history(&self) -> impl Iterator<Item = ProtocolState> + '_ {
        self.history.iter().map(|(s, _)| *s)
    }

    /// Advance to `next`, notifying the observer if one is attached.
    ///
    /// Advancing out of a terminal state is a logic bug and only debug-asserts;
    /// the run log stays truthful either way.
    pub fn advance(&mut self, next: ProtocolState, observer: Option<&dyn RunObserver>) {
        debug_assert!(!self.state.is_terminal(), "advanced a terminal run");
        let from = self.state;
        tracing::debug!(
            run = %self.id,
            kind = %self.kind,
            %from,
            to = %next,
            "protocol transition"
        );
        self.state = next;
        self.history.push((next, now_millis()));
        if let Some(observer) = observer {
            observer.on_transition(self, from, next);
        }
    }
}
