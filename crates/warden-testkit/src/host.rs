//! Mock host
//!
//! Implements every effect an account needs. Clones share state, so a test
//! keeps one handle while the account owns another, then moves the clock and
//! swaps the current transaction between calls.

use crate::keys::KeyTestFixture;
use crate::time::ControllableClock;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use warden_core::{
    ChainId, ContractAddress, CryptoEffects, ExecutionInfoEffects, Felt, Hash32,
    SignatureSchemes, Signer, TimeEffects, Timestamp, TransactionInfo,
    WardenResult,
};

/// Default block time new hosts start at
pub const DEFAULT_START_TIME: Timestamp = 1_700_000_000;

/// In-memory host for driving an account in tests
#[derive(Debug, Clone)]
pub struct MockHost {
    clock: ControllableClock,
    chain_id: ChainId,
    account_address: ContractAddress,
    transaction: Arc<Mutex<TransactionInfo>>,
    nonce: Arc<AtomicU64>,
    schemes: SignatureSchemes,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Host on `SN_SEPOLIA` at a fixed address and start time
    pub fn new() -> Self {
        Self {
            clock: ControllableClock::new(DEFAULT_START_TIME),
            chain_id: ChainId::from_name("SN_SEPOLIA").expect("valid short string"),
            account_address: ContractAddress(Felt::from(0xacc0_u64)),
            transaction: Arc::new(Mutex::new(TransactionInfo::default())),
            nonce: Arc::new(AtomicU64::new(0)),
            schemes: SignatureSchemes::default(),
        }
    }

    /// Override the chain id
    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Override the account address
    pub fn with_account_address(mut self, account_address: ContractAddress) -> Self {
        self.account_address = account_address;
        self
    }

    /// Override the signature schemes
    pub fn with_schemes(mut self, schemes: SignatureSchemes) -> Self {
        self.schemes = schemes;
        self
    }

    /// Shared block clock
    pub fn clock(&self) -> &ControllableClock {
        &self.clock
    }

    /// Move block time forward
    pub fn advance_time(&self, seconds: u64) {
        self.clock.advance(seconds);
    }

    /// Replace the current transaction
    pub fn set_transaction(&self, transaction: TransactionInfo) {
        *self.transaction.lock() = transaction;
    }

    /// Start a fresh transaction signed by `signers`
    ///
    /// Each call uses a new transaction hash.
    pub fn sign_with(&self, signers: &[&KeyTestFixture]) -> Hash32 {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let hash = Hash32::from_bytes(&nonce.to_be_bytes());
        self.sign_message_with(hash, signers);
        hash
    }

    /// Set the transaction signatures to `signers` over `message`
    pub fn sign_message_with(&self, message: Hash32, signers: &[&KeyTestFixture]) {
        let signatures = signers.iter().map(|key| key.sign(&message)).collect();
        self.set_transaction(TransactionInfo::new(message, signatures));
    }
}

impl TimeEffects for MockHost {
    fn block_timestamp(&self) -> Timestamp {
        self.clock.now()
    }
}

impl ExecutionInfoEffects for MockHost {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    fn account_address(&self) -> ContractAddress {
        self.account_address
    }

    fn transaction(&self) -> TransactionInfo {
        self.transaction.lock().clone()
    }
}

impl CryptoEffects for MockHost {
    fn verify_signature(
        &self,
        signer: &Signer,
        message: &Hash32,
        signature: &[u8],
    ) -> WardenResult<bool> {
        self.schemes.verify_signature(signer, message, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_is_sepolia() {
        let host = MockHost::new();
        assert_eq!(host.chain_id(), ChainId::from_name("SN_SEPOLIA").unwrap());
    }

    #[test]
    fn test_sign_with_uses_fresh_hashes() {
        let host = MockHost::new();
        let key = KeyTestFixture::from_seed_string("owner");
        let first = host.sign_with(&[&key]);
        let second = host.sign_with(&[&key]);
        assert_ne!(first, second);

        let transaction = host.transaction();
        assert_eq!(transaction.transaction_hash, second);
        assert_eq!(transaction.signatures.len(), 1);
        assert!(key.verify(&second, &transaction.signatures[0]));
    }
}
