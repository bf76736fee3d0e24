//! Record transitions
//!
//! A transition consumes zero-or-one live version and produces exactly one
//! successor. Parties attest to the canonical encoding of the whole
//! transition (inputs consumed plus outputs produced), so a signature covers
//! both what is retired and what replaces it.

use crate::error::{ProtocolError, ProtocolResult};
use rl_01_records::{validate_issue, validate_update, InvariantViolation, RecordVersion};
use serde::{Deserialize, Serialize};
use shared_crypto::{hashing, PartySignature};
use shared_types::{Hash, Party, Timestamp, VersionRef};

/// The two protocol commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCommand {
    /// Create a new logical record; consumes nothing.
    Issue,
    /// Replace the live version of an existing logical record.
    Update,
}

/// A proposed record transition, before any signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTransition {
    pub command: TransitionCommand,
    /// The live version being consumed; `None` for Issue.
    ///
    /// Carried in full so the counterparty can re-validate the update rules
    /// without trusting the proposer's vault.
    pub consumed: Option<RecordVersion>,
    /// The version this transition produces.
    pub produced: RecordVersion,
}

impl RecordTransition {
    pub fn issue(produced: RecordVersion) -> Self {
        Self {
            command: TransitionCommand::Issue,
            consumed: None,
            produced,
        }
    }

    pub fn update(consumed: RecordVersion, produced: RecordVersion) -> Self {
        Self {
            command: TransitionCommand::Update,
            consumed: Some(consumed),
            produced,
        }
    }

    /// Reference of the version this transition retires, if any.
    pub fn consumed_ref(&self) -> Option<VersionRef> {
        self.consumed.as_ref().map(|v| v.version_ref)
    }

    /// The two parties whose signatures make this transition complete.
    pub fn required_signers(&self) -> [&Party; 2] {
        self.produced.participants()
    }

    /// Re-run the kind-specific invariant rules for this transition.
    ///
    /// Identical on proposer and counterparty: same inputs, same verdict.
    pub fn validate(&self, now: Timestamp) -> Result<(), InvariantViolation> {
        match &self.consumed {
            None => validate_issue(&self.produced, now),
            Some(old) => validate_update(old, &self.produced, now),
        }
    }

    /// Digest of the canonical encoding, the message every signer attests to.
    pub fn signing_message(&self) -> ProtocolResult<Hash> {
        let bytes = bincode::serialize(self).map_err(|e| ProtocolError::EncodingFailed {
            reason: e.to_string(),
        })?;
        Ok(hashing::digest(&bytes))
    }
}

/// A transition plus the signatures collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransition {
    pub transition: RecordTransition,
    pub signatures: Vec<PartySignature>,
}

impl SignedTransition {
    /// Wrap a transition with the proposer's signature (half-signed).
    pub fn new(transition: RecordTransition, proposer_signature: PartySignature) -> Self {
        Self {
            transition,
            signatures: vec![proposer_signature],
        }
    }

    /// Attach a counter-signature.
    pub fn add_signature(&mut self, signature: PartySignature) {
        self.signatures.push(signature);
    }

    /// The signature produced by `party`'s owning key, if present.
    pub fn signature_of(&self, party: &Party) -> Option<&PartySignature> {
        self.signatures
            .iter()
            .find(|s| s.signer == party.owning_key)
    }

    /// Verify that every required signer has attested to this transition.
    pub fn verify_complete(&self) -> ProtocolResult<()> {
        let message = self.transition.signing_message()?;
        for party in self.transition.required_signers() {
            let signature =
                self.signature_of(party)
                    .ok_or_else(|| ProtocolError::InvalidSignatures {
                        reason: format!("missing signature from {party}"),
                    })?;
            signature
                .verify_as(&message, &party.owning_key)
                .map_err(|e| ProtocolError::InvalidSignatures {
                    reason: format!("{party}: {e}"),
                })?;
        }
        Ok(())
    }
}
