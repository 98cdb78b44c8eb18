//! Pure synchronous hashing for identifiers and signed messages
//!
//! GUIDs, recovery messages and entry point selectors are all derived through
//! this module so the algorithm is declared in exactly one place. Hashing is
//! deterministic and side-effect free, so it is a plain trait rather than an
//! effect.
//!
//! Current algorithm: **SHA-256** (32-byte output)

use sha2::{Digest, Sha256};
use std::fmt;

/// Synchronous trait for cryptographic hashing
pub trait HashAlgorithm: Send + Sync + fmt::Debug {
    /// Hash arbitrary bytes to a 32-byte digest
    fn hash(&self, data: &[u8]) -> [u8; 32];

    /// Create an incremental hasher for multi-part hashing
    fn hasher(&self) -> Box<dyn Hasher>;
}

/// Trait for incremental hashing of multi-part data
pub trait Hasher: Send {
    /// Update the hasher with more data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hasher and return the 32-byte digest
    fn finalize(self: Box<Self>) -> [u8; 32];
}

/// SHA-256 hash implementation
#[derive(Debug, Clone, Copy)]
pub struct Sha256Algorithm;

impl HashAlgorithm for Sha256Algorithm {
    fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn hasher(&self) -> Box<dyn Hasher> {
        Box::new(Sha256Hasher(Sha256::new()))
    }
}

struct Sha256Hasher(Sha256);

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> [u8; 32] {
        self.0.finalize().into()
    }
}

/// The hash algorithm used for every derivation in the workspace.
pub const ALGORITHM: Sha256Algorithm = Sha256Algorithm;

/// Hash bytes with the global algorithm
#[inline]
pub fn hash(data: &[u8]) -> [u8; 32] {
    ALGORITHM.hash(data)
}

/// Incremental hasher using the global algorithm
#[inline]
pub fn hasher() -> Box<dyn Hasher> {
    ALGORITHM.hasher()
}

/// Hash a sequence of parts behind a domain tag
///
/// Parts are concatenated as-is, so callers must only pass fixed-width fields
/// (or fields whose width is implied by the tag) to keep the encoding
/// unambiguous.
pub fn hash_with_domain(domain: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let mut h = hasher();
    h.update(domain);
    for part in parts {
        h.update(part);
    }
    h.finalize()
}
