//! # Error Types
//!
//! Identity parsing errors shared across subsystems.

use thiserror::Error;

/// Errors produced when parsing identity material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Organization name not in `O=...,L=...,C=...` form.
    #[error("Malformed organization name: {name}")]
    MalformedName { name: String },

    /// Logical record id is not a valid UUID.
    #[error("Malformed logical record id: {id}")]
    MalformedRecordId { id: String },
}
