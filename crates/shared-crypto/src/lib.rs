//! # Shared Crypto - Attestation Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE3 | Transition digests |
//! | `signatures` | Ed25519 | Party attestation signatures |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency at signing time
//! - **BLAKE3**: SIMD-accelerated digest over the canonical transition bytes
//! - Every signature carries the signer's verifying key so a counter-signature
//!   is attributable to a named party

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

pub use errors::CryptoError;
pub use hashing::digest;
pub use signatures::{Keypair, PartySignature};
