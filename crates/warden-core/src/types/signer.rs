//! Signers, their key types and the signatures they supply.

use super::identifiers::{Guid, Hash32};
use super::roles::Role;
use crate::crypto::hash::hash_with_domain;
use crate::errors::{WardenError, WardenResult};
use crate::felt::Felt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key type of a signer
///
/// Each variant carries its own GUID domain tag and wire tag. New key types
/// are added here together with a matching `SignatureScheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignerType {
    /// Ed25519 public key (32 bytes)
    Ed25519,
}

impl SignerType {
    /// Every supported key type
    pub const ALL: [SignerType; 1] = [SignerType::Ed25519];

    /// Tag used in calldata
    pub fn wire_tag(&self) -> u64 {
        match self {
            SignerType::Ed25519 => 0,
        }
    }

    /// Resolve a calldata tag
    pub fn from_wire_tag(tag: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.wire_tag() == tag)
    }

    /// Domain separator for GUID derivation
    pub fn guid_domain(&self) -> &'static [u8] {
        match self {
            SignerType::Ed25519 => b"Warden Ed25519 Signer",
        }
    }

    /// Number of calldata words a signature of this type occupies
    pub fn signature_words(&self) -> usize {
        match self {
            SignerType::Ed25519 => 2,
        }
    }
}

impl fmt::Display for SignerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerType::Ed25519 => write!(f, "ed25519"),
        }
    }
}

/// A key-type tagged public key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signer {
    /// Key type
    pub signer_type: SignerType,
    /// Public key material
    pub public_key: Felt,
}

impl Signer {
    /// Create a signer of the given type
    pub fn new(signer_type: SignerType, public_key: Felt) -> Self {
        Self {
            signer_type,
            public_key,
        }
    }

    /// Create an ed25519 signer from verifying key bytes
    pub fn ed25519(public_key: [u8; 32]) -> Self {
        Self::new(SignerType::Ed25519, Felt(public_key))
    }

    /// Whether the public key is zero (never a valid signer)
    pub fn is_zero(&self) -> bool {
        self.public_key.is_zero()
    }

    /// Reject zero keys for the given role
    pub fn ensure_nonzero(&self, role: Role) -> WardenResult<&Self> {
        if self.is_zero() {
            return Err(WardenError::zero_signer(role));
        }
        Ok(self)
    }

    /// Deterministic, domain-separated identifier of this signer
    pub fn guid(&self) -> Guid {
        Guid::from_hash(Hash32::new(hash_with_domain(
            self.signer_type.guid_domain(),
            &[self.public_key.as_bytes()],
        )))
    }
}

impl fmt::Display for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.signer_type, self.public_key)
    }
}

/// A signature together with the signer that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSignature {
    /// Claimed signer
    pub signer: Signer,
    /// Raw signature bytes in the scheme's native encoding
    pub signature: Vec<u8>,
}

impl SignerSignature {
    /// Pair a signer with its signature bytes
    pub fn new(signer: Signer, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            signer,
            signature: signature.into(),
        }
    }

    /// GUID of the claimed signer
    pub fn guid(&self) -> Guid {
        self.signer.guid()
    }
}
