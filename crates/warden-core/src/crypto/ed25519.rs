//! Ed25519 signature scheme backed by `ed25519-dalek`.

use super::SignatureScheme;
use crate::errors::WardenResult;
use crate::felt::Felt;
use crate::types::{Hash32, SignerType};
use ed25519_dalek::{Signature, VerifyingKey};

/// Length of an encoded ed25519 signature
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Strict ed25519 verification over the 32-byte message digest
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Scheme;

impl SignatureScheme for Ed25519Scheme {
    fn signer_type(&self) -> SignerType {
        SignerType::Ed25519
    }

    fn verify(&self, public_key: &Felt, message: &Hash32, signature: &[u8]) -> WardenResult<bool> {
        let Ok(verifying_key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
            tracing::debug!(public_key = %public_key, "rejecting malformed ed25519 key");
            return Ok(false);
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(verifying_key
            .verify_strict(message.as_bytes(), &signature)
            .is_ok())
    }
}
