//! Reference adapters for the driven ports.
//!
//! In-memory implementations used by tests and single-process deployments;
//! production deployments supply their own transports and notary clients
//! behind the same ports.

pub mod local_counterparty;
pub mod memory_notary;
pub mod memory_vault;
pub mod static_topology;

pub use local_counterparty::LocalCounterparty;
pub use memory_notary::MemoryNotary;
pub use memory_vault::MemoryVault;
pub use static_topology::StaticTopology;
