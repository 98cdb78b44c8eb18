//! Identifier types shared by every Warden crate
//!
//! GUIDs stand in for raw public keys in all stored account state. Chain ids
//! and contract addresses are host-provided values that bind signed messages
//! to one account on one network.

use crate::felt::Felt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte digest
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    /// Wrap an existing digest
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash arbitrary bytes with the global algorithm
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(crate::crypto::hash::hash(data))
    }

    /// Digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex without prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({})", self.to_hex())
    }
}

impl From<Hash32> for Felt {
    fn from(hash: Hash32) -> Self {
        Felt(hash.0)
    }
}

impl From<Felt> for Hash32 {
    fn from(felt: Felt) -> Self {
        Self(felt.0)
    }
}

/// Stable identifier of a signer, derived from its type and public key
///
/// The registry refuses zero signers before deriving a GUID, so stored
/// GUIDs are never produced from zero keys. `is_zero` guards values that
/// arrive from the wire instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Guid(pub Hash32);

impl Guid {
    /// Wrap a digest as a GUID
    pub const fn from_hash(hash: Hash32) -> Self {
        Self(hash)
    }

    /// Underlying digest
    pub fn as_hash(&self) -> &Hash32 {
        &self.0
    }

    /// Digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Whether this is the all-zero identifier
    pub fn is_zero(&self) -> bool {
        self.0 .0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "guid-{}", &self.0.to_hex()[..16])
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", self.0.to_hex())
    }
}

impl From<Guid> for Felt {
    fn from(guid: Guid) -> Self {
        Felt(guid.0 .0)
    }
}

impl From<Felt> for Guid {
    fn from(felt: Felt) -> Self {
        Self(Hash32(felt.0))
    }
}

/// Network identifier bound into signed messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub Felt);

impl ChainId {
    /// Create from a short ASCII name such as `SN_SEPOLIA`
    pub fn from_name(name: &str) -> crate::WardenResult<Self> {
        Felt::from_short_string(name).map(Self)
    }

    /// Raw word
    pub fn as_felt(&self) -> &Felt {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain-{}", self.0)
    }
}

/// Address of a deployed account contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractAddress(pub Felt);

impl ContractAddress {
    /// Raw word
    pub fn as_felt(&self) -> &Felt {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Felt> for ContractAddress {
    fn from(felt: Felt) -> Self {
        Self(felt)
    }
}
