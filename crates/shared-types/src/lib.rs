//! # Shared Types Crate
//!
//! This crate contains the domain entities shared across the ledger
//! subsystems: organization identities, record identifiers, and the
//! primitive byte aliases used by the crypto layer.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Stable Identity**: A [`LogicalRecordId`] never changes across versions
//!   of one logical record; a [`VersionRef`] names exactly one version.

pub mod entities;
pub mod errors;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use time::*;
