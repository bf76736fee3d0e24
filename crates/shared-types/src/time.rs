//! # Timestamps
//!
//! Millisecond wall-clock timestamps. Stored as plain `u64` so every domain
//! type stays `Serialize`/`Deserialize` without custom impls.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Current wall-clock time in milliseconds.
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
