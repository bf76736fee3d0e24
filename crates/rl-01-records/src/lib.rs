//! # rl-01-records
//!
//! Record Model for the RIU attested ledger: the four telemetry record kinds,
//! their chained-version identity, and the per-kind invariant validator.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Record kinds**: Measurement, Command, ForcedMeasureWindow, FlowComputerBlob
//! - **Version identity**: one stable [`LogicalRecordId`] per logical record,
//!   a fresh [`VersionRef`] per version
//! - **Invariant validation**: pure issue/update rule sets, re-run identically
//!   by proposer and counterparty before either signs
//!
//! ## Architecture
//!
//! ```text
//! caller fields ──→ RecordVersion::issue / ::successor ──→ candidate version
//!                                                               │
//!                              validate_issue / validate_update ┤
//!                                                               │
//!                                     Protocol (rl-02) ←────────┘
//! ```
//!
//! Validation is deliberately free of I/O and clock access: `now` is an
//! argument, so both parties derive the same verdict from the same inputs.
//!
//! [`LogicalRecordId`]: shared_types::LogicalRecordId
//! [`VersionRef`]: shared_types::VersionRef

pub mod domain;
pub mod error;

pub use domain::record::{
    CommandFields, FlowComputerBlobFields, ForcedMeasureWindowFields, MeasurementFields,
    RecordFields, RecordKind, RecordVersion,
};
pub use domain::validate::{rules, validate_issue, validate_update};
pub use error::InvariantViolation;
