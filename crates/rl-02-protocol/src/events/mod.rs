//! Events emitted by the Update Protocol.

pub mod outgoing;
