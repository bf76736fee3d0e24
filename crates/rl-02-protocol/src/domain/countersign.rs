//! Counterparty-side counter-signing
//!
//! The responder never trusts the proposer's validation. Before signing it
//! re-derives everything from the transition data itself: that it is a named
//! party, that the proposer really signed, and that every kind-specific
//! invariant holds. Only then does it attest.

use crate::domain::identity::LocalIdentity;
use crate::domain::transition::SignedTransition;
use crate::error::{ProtocolError, ProtocolResult};
use shared_crypto::PartySignature;
use shared_types::Timestamp;

/// Validate a half-signed transition and produce our counter-signature.
///
/// Fails with the specific violated rule or signature defect; a failure here
/// is observed by the proposer as a decline, and nothing is signed.
pub fn countersign(
    half_signed: &SignedTransition,
    identity: &LocalIdentity,
    now: Timestamp,
) -> ProtocolResult<PartySignature> {
    let transition = &half_signed.transition;
    let me = identity.party();

    // We must be one of the two named parties on the produced version.
    let proposer = transition
        .produced
        .other_party(me)
        .ok_or_else(|| ProtocolError::UnauthorizedCaller {
            caller: me.to_string(),
            version_ref: transition.produced.version_ref,
        })?
        .clone();

    // For an update, the proposer must also be named on the consumed version.
    if let Some(old) = &transition.consumed {
        if !old.is_participant(&proposer) {
            return Err(ProtocolError::UnauthorizedCaller {
                caller: proposer.to_string(),
                version_ref: old.version_ref,
            });
        }
    }

    // The proposer's signature must verify against its owning key.
    let message = transition.signing_message()?;
    let proposer_signature =
        half_signed
            .signature_of(&proposer)
            .ok_or_else(|| ProtocolError::InvalidSignatures {
                reason: format!("missing proposer signature from {proposer}"),
            })?;
    proposer_signature
        .verify_as(&message, &proposer.owning_key)
        .map_err(|e| ProtocolError::InvalidSignatures {
            reason: format!("{proposer}: {e}"),
        })?;

    // Independent re-validation of the full rule set.
    transition.validate(now)?;

    Ok(identity.sign(&message))
}
