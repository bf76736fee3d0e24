//! # BLAKE3 Hashing
//!
//! Digest of the canonical transition encoding. All parties must hash the
//! same bytes, so callers are responsible for encoding deterministically
//! before hashing.

use shared_types::Hash;

/// Hash arbitrary bytes into a 256-bit digest.
pub fn digest(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Hash several byte slices as one logical message.
///
/// Equivalent to concatenating the slices first; avoids the allocation.
pub fn digest_parts(parts: &[&[u8]]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}
