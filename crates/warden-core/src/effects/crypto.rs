//! Signature verification effect.

use crate::crypto::SignatureSchemes;
use crate::errors::WardenResult;
use crate::types::{Hash32, Signer};

/// Per-key-type signature verification
pub trait CryptoEffects: Send + Sync {
    /// Verify `signature` by `signer` over `message`
    fn verify_signature(
        &self,
        signer: &Signer,
        message: &Hash32,
        signature: &[u8],
    ) -> WardenResult<bool>;
}

impl CryptoEffects for SignatureSchemes {
    fn verify_signature(
        &self,
        signer: &Signer,
        message: &Hash32,
        signature: &[u8],
    ) -> WardenResult<bool> {
        self.verify(signer, message, signature)
    }
}

impl<T: CryptoEffects + ?Sized> CryptoEffects for std::sync::Arc<T> {
    fn verify_signature(
        &self,
        signer: &Signer,
        message: &Hash32,
        signature: &[u8],
    ) -> WardenResult<bool> {
        (**self).verify_signature(signer, message, signature)
    }
}

impl<T: CryptoEffects + ?Sized> CryptoEffects for &T {
    fn verify_signature(
        &self,
        signer: &Signer,
        message: &Hash32,
        signature: &[u8],
    ) -> WardenResult<bool> {
        (**self).verify_signature(signer, message, signature)
    }
}
