//! Local node identity
//!
//! Binds the node's organization name to its signing keypair. The party
//! published to counterparties carries the keypair's verifying key, so a
//! signature produced here is attributable to exactly this organization.

use shared_crypto::{Keypair, PartySignature};
use shared_types::{OrgName, Party};

/// The local organization's signing identity.
pub struct LocalIdentity {
    party: Party,
    keypair: Keypair,
}

impl LocalIdentity {
    /// Bind an organization name to a keypair.
    pub fn new(name: OrgName, keypair: Keypair) -> Self {
        let party = Party::new(name, keypair.public_key());
        Self { party, keypair }
    }

    /// The party other nodes address this organization as.
    pub fn party(&self) -> &Party {
        &self.party
    }

    /// Attest to a message with the local signing key.
    pub fn sign(&self, message: &[u8]) -> PartySignature {
        self.keypair.sign(message)
    }
}
