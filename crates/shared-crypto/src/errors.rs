//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Public key bytes do not encode a valid curve point.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature verification failed.
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Signature was produced by a key other than the expected signer's.
    #[error("Signer mismatch: signature not bound to the expected party key")]
    SignerMismatch,
}
