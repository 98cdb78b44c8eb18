//! Execution context supplied by the host ledger.

use crate::types::{ChainId, ContractAddress, Hash32, SignerSignature};
use serde::{Deserialize, Serialize};

/// The transaction currently being executed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionInfo {
    /// Hash the transaction signatures were produced over
    pub transaction_hash: Hash32,
    /// Signatures supplied by the transaction's signers
    pub signatures: Vec<SignerSignature>,
}

impl TransactionInfo {
    /// Create transaction info
    pub fn new(transaction_hash: Hash32, signatures: Vec<SignerSignature>) -> Self {
        Self {
            transaction_hash,
            signatures,
        }
    }
}

/// Host-provided identity of the network, the account and the current transaction
pub trait ExecutionInfoEffects: Send + Sync {
    /// Chain the account lives on
    fn chain_id(&self) -> ChainId;

    /// Address of the executing account
    fn account_address(&self) -> ContractAddress;

    /// Transaction being executed
    fn transaction(&self) -> TransactionInfo;
}

impl<T: ExecutionInfoEffects + ?Sized> ExecutionInfoEffects for std::sync::Arc<T> {
    fn chain_id(&self) -> ChainId {
        (**self).chain_id()
    }

    fn account_address(&self) -> ContractAddress {
        (**self).account_address()
    }

    fn transaction(&self) -> TransactionInfo {
        (**self).transaction()
    }
}

impl<T: ExecutionInfoEffects + ?Sized> ExecutionInfoEffects for &T {
    fn chain_id(&self) -> ChainId {
        (**self).chain_id()
    }

    fn account_address(&self) -> ContractAddress {
        (**self).account_address()
    }

    fn transaction(&self) -> TransactionInfo {
        (**self).transaction()
    }
}
