//! # Protocol Metrics
//!
//! Prometheus metrics for monitoring protocol throughput and health.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! rl-02-protocol = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `protocol_transitions_committed_total` - Counter of committed transitions
//! - `protocol_transitions_rejected_total` - Counter of rejected transitions (by reason)
//! - `protocol_transitions_aborted_total` - Counter of aborted transitions (infrastructure)
//! - `protocol_countersign_declines_total` - Counter of counterparty declines

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_counter_vec, register_int_counter, CounterVec, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total transitions committed
    pub static ref TRANSITIONS_COMMITTED: IntCounter = register_int_counter!(
        "protocol_transitions_committed_total",
        "Total number of transitions committed by the notary gate"
    )
    .expect("Failed to create TRANSITIONS_COMMITTED metric");

    /// Total transitions rejected, labeled by reason
    pub static ref TRANSITIONS_REJECTED: CounterVec = register_counter_vec!(
        "protocol_transitions_rejected_total",
        "Total number of transitions rejected",
        &["reason"]
    )
    .expect("Failed to create TRANSITIONS_REJECTED metric");

    /// Total transitions aborted on infrastructure failure
    pub static ref TRANSITIONS_ABORTED: IntCounter = register_int_counter!(
        "protocol_transitions_aborted_total",
        "Total number of transitions aborted on infrastructure failure"
    )
    .expect("Failed to create TRANSITIONS_ABORTED metric");

    /// Total counterparty declines
    pub static ref COUNTERSIGN_DECLINES: IntCounter = register_int_counter!(
        "protocol_countersign_declines_total",
        "Total number of counter-signature requests declined"
    )
    .expect("Failed to create COUNTERSIGN_DECLINES metric");
}

/// Record a committed transition.
pub fn record_committed() {
    #[cfg(feature = "metrics")]
    TRANSITIONS_COMMITTED.inc();
}

/// Record a rejected transition with its reason label.
pub fn record_rejected(reason: &str) {
    #[cfg(feature = "metrics")]
    TRANSITIONS_REJECTED.with_label_values(&[reason]).inc();
    #[cfg(not(feature = "metrics"))]
    let _ = reason;
}

/// Record an aborted transition.
pub fn record_aborted() {
    #[cfg(feature = "metrics")]
    TRANSITIONS_ABORTED.inc();
}

/// Record a counterparty decline.
pub fn record_countersign_decline() {
    #[cfg(feature = "metrics")]
    COUNTERSIGN_DECLINES.inc();
}
