//! Key test helpers and utilities
//!
//! Deterministic ed25519 keys for Warden tests. Fixtures produce both the
//! account-side `Signer` and ready-to-submit `SignerSignature`s.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use warden_core::{Guid, Hash32, Signer, SignerSignature};

/// Key test fixture for consistent test key generation
#[derive(Debug, Clone)]
pub struct KeyTestFixture {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyTestFixture {
    /// Create a new key fixture with deterministic generation from a seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Create a key fixture from a seed string
    pub fn from_seed_string(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut seed_bytes = [0u8; 32];
        seed_bytes.copy_from_slice(&digest);
        Self::from_seed(&seed_bytes)
    }

    /// Key drawn from a ChaCha20 stream seeded with `seed`
    pub fn random(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::from_signing_key(SigningKey::generate(&mut rng))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Raw public key bytes
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// This key as an account signer
    pub fn signer(&self) -> Signer {
        Signer::ed25519(self.public_key_bytes())
    }

    /// GUID this key registers under
    pub fn guid(&self) -> Guid {
        self.signer().guid()
    }

    /// Sign a message hash, paired with this key's signer
    pub fn sign(&self, message: &Hash32) -> SignerSignature {
        use ed25519_dalek::Signer as _;
        let signature = self.signing_key.sign(message.as_bytes());
        SignerSignature::new(self.signer(), signature.to_bytes().to_vec())
    }

    /// Verify a signature with this key's verifying key
    pub fn verify(&self, message: &Hash32, signature: &SignerSignature) -> bool {
        let Ok(signature) = ed25519_dalek::Signature::from_slice(&signature.signature) else {
            return false;
        };
        self.verifying_key
            .verify_strict(message.as_bytes(), &signature)
            .is_ok()
    }
}

/// Builder for creating multiple test keys with consistent configuration
#[derive(Debug)]
pub struct KeySetBuilder {
    count: usize,
    base_seed: Option<String>,
}

impl KeySetBuilder {
    /// Create a new key set builder
    pub fn new(count: usize) -> Self {
        Self {
            count,
            base_seed: None,
        }
    }

    /// Set a base seed for deterministic key generation
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.base_seed = Some(seed.into());
        self
    }

    /// Build the set of keys
    pub fn build(self) -> Vec<KeyTestFixture> {
        let base = self.base_seed.as_deref().unwrap_or("key-seed");
        (0..self.count)
            .map(|i| KeyTestFixture::from_seed_string(&format!("{base}-{i}")))
            .collect()
    }
}
