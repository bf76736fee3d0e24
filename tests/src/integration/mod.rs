//! Cross-subsystem integration scenarios.

pub mod harness;

mod conflicts;
mod lifecycle;
