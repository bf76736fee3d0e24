//! Driving and driven ports for the Update Protocol.

pub mod inbound;
pub mod outbound;
