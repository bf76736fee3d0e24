//! # Core Domain Entities
//!
//! Defines the identity types shared by every ledger subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `OrgName`, `Party`
//! - **Records**: `LogicalRecordId`, `VersionRef`
//! - **Primitives**: `Hash`, `Signature`, `PublicKey`

use crate::errors::IdentityError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// CLUSTER A: PRIMITIVES
// =============================================================================

/// A 32-byte hash (Blake3).
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

// =============================================================================
// CLUSTER B: ORGANIZATION IDENTITY
// =============================================================================

/// Distinguished name of an organization on the network.
///
/// The network topology recognizes exactly two member organizations; the
/// `organisation` component is the discriminating part, locality and country
/// exist for display and audit purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgName {
    pub organisation: String,
    pub locality: String,
    pub country: String,
}

impl OrgName {
    pub fn new(
        organisation: impl Into<String>,
        locality: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            organisation: organisation.into(),
            locality: locality.into(),
            country: country.into(),
        }
    }

    /// Parse from the `O=...,L=...,C=...` display form.
    pub fn parse(name: &str) -> Result<Self, IdentityError> {
        let mut organisation = None;
        let mut locality = None;
        let mut country = None;

        for part in name.split(',') {
            let part = part.trim();
            match part.split_once('=') {
                Some(("O", v)) => organisation = Some(v.to_string()),
                Some(("L", v)) => locality = Some(v.to_string()),
                Some(("C", v)) => country = Some(v.to_string()),
                _ => {
                    return Err(IdentityError::MalformedName {
                        name: name.to_string(),
                    })
                }
            }
        }

        match (organisation, locality, country) {
            (Some(o), Some(l), Some(c)) => Ok(Self::new(o, l, c)),
            _ => Err(IdentityError::MalformedName {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "O={},L={},C={}",
            self.organisation, self.locality, self.country
        )
    }
}

/// A network party: an organization name bound to its signing identity.
///
/// The bound key is what makes a counter-signature attributable; two parties
/// are equal only when both name and key match.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub name: OrgName,
    #[serde_as(as = "Bytes")]
    pub owning_key: PublicKey,
}

impl Party {
    pub fn new(name: OrgName, owning_key: PublicKey) -> Self {
        Self { name, owning_key }
    }

    /// The discriminating organization component of this party's name.
    pub fn organisation(&self) -> &str {
        &self.name.organisation
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// CLUSTER C: RECORD IDENTIFIERS
// =============================================================================

/// Stable identifier of one logical record across all of its versions.
///
/// Assigned once at issue time and carried unchanged through every update.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LogicalRecordId(pub Uuid);

impl LogicalRecordId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| IdentityError::MalformedRecordId { id: s.to_string() })
    }
}

impl fmt::Display for LogicalRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to one particular version of a logical record.
///
/// Fresh for every version; a committed transition consumes at most one
/// `VersionRef` and produces exactly one new one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VersionRef(pub Uuid);

impl VersionRef {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
