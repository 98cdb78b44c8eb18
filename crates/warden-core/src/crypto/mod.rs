//! Cryptographic capabilities
//!
//! Signature verification is pluggable per key type: every `SignerType` is
//! served by one `SignatureScheme`, and `SignatureSchemes` dispatches on the
//! signer's type. The account core never names a concrete algorithm.

pub mod ed25519;
pub mod hash;

pub use ed25519::Ed25519Scheme;
pub use hash::{hash, hash_with_domain, hasher, HashAlgorithm, Hasher};

use crate::errors::{WardenError, WardenResult};
use crate::felt::Felt;
use crate::types::{Hash32, Signer, SignerType};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Verification capability for one key type
pub trait SignatureScheme: Send + Sync + fmt::Debug {
    /// Key type this scheme verifies
    fn signer_type(&self) -> SignerType;

    /// Verify `signature` over `message` for `public_key`
    ///
    /// Malformed keys or signatures verify as `false`; `Err` is reserved for
    /// a broken capability.
    fn verify(&self, public_key: &Felt, message: &Hash32, signature: &[u8]) -> WardenResult<bool>;
}

/// Set of schemes keyed by signer type
#[derive(Debug, Clone)]
pub struct SignatureSchemes {
    schemes: BTreeMap<SignerType, Arc<dyn SignatureScheme>>,
}

impl SignatureSchemes {
    /// Empty set
    pub fn empty() -> Self {
        Self {
            schemes: BTreeMap::new(),
        }
    }

    /// Register (or replace) the scheme for its signer type
    pub fn with_scheme(mut self, scheme: Arc<dyn SignatureScheme>) -> Self {
        self.schemes.insert(scheme.signer_type(), scheme);
        self
    }

    /// Whether a scheme is available for `signer_type`
    pub fn supports(&self, signer_type: SignerType) -> bool {
        self.schemes.contains_key(&signer_type)
    }

    /// Verify a signature with the scheme matching the signer's type
    pub fn verify(&self, signer: &Signer, message: &Hash32, signature: &[u8]) -> WardenResult<bool> {
        let scheme = self.schemes.get(&signer.signer_type).ok_or_else(|| {
            WardenError::crypto(format!("no signature scheme for {}", signer.signer_type))
        })?;
        scheme.verify(&signer.public_key, message, signature)
    }
}

impl Default for SignatureSchemes {
    fn default() -> Self {
        Self::empty().with_scheme(Arc::new(Ed25519Scheme))
    }
}
