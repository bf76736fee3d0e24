//! # RIU-Ledger Test Suite
//!
//! Unified test crate for cross-subsystem scenarios:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs    # Two-node in-process network fixture
//!     ├── lifecycle.rs  # Issue/update lifecycle per record kind
//!     └── conflicts.rs  # Concurrent updates, chain integrity, failures
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rl-tests
//! ```

pub mod integration;
