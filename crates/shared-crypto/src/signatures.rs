//! # Ed25519 Signatures
//!
//! Party attestation signatures with deterministic nonces.
//!
//! A [`PartySignature`] binds the signature to the signer's verifying key so
//! that a transition carrying several signatures can be checked against the
//! named parties on the record, not just "some valid key".

use crate::errors::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{PublicKey, Signature};
use zeroize::Zeroize;

/// Ed25519 keypair held by the local node.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a random keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Create from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// The verifying key, as raw bytes.
    pub fn public_key(&self) -> PublicKey {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message, producing a signature bound to this key.
    pub fn sign(&self, message: &[u8]) -> PartySignature {
        PartySignature {
            signer: self.public_key(),
            signature: self.signing_key.sign(message).to_bytes(),
        }
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        // Zeroize secret key material
        let mut bytes = self.signing_key.to_bytes();
        bytes.zeroize();
    }
}

/// A detached signature together with the key that produced it.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySignature {
    /// Verifying key of the signer.
    #[serde_as(as = "Bytes")]
    pub signer: PublicKey,
    /// Ed25519 signature over the message.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl PartySignature {
    /// Verify this signature over `message`.
    pub fn verify(&self, message: &[u8]) -> Result<(), CryptoError> {
        let key =
            VerifyingKey::from_bytes(&self.signer).map_err(|_| CryptoError::InvalidPublicKey)?;
        let sig = ed25519_dalek::Signature::from_bytes(&self.signature);
        key.verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Verify this signature and that it was produced by `expected_signer`.
    pub fn verify_as(&self, message: &[u8], expected_signer: &PublicKey) -> Result<(), CryptoError> {
        if &self.signer != expected_signer {
            return Err(CryptoError::SignerMismatch);
        }
        self.verify(message)
    }
}
