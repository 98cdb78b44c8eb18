//! Host effect interfaces
//!
//! The account consumes exactly three things from its environment: the block
//! clock, the execution context (chain, address, transaction signatures) and
//! signature verification. Each is a narrow trait; `AccountEffects` is the
//! combined bound the account is generic over.

pub mod crypto;
pub mod execution;
pub mod time;

pub use crypto::CryptoEffects;
pub use execution::{ExecutionInfoEffects, TransactionInfo};
pub use time::{TimeEffects, Timestamp};

/// Combined effects required by an account instance.
pub trait AccountEffects: TimeEffects + ExecutionInfoEffects + CryptoEffects {}

// Blanket implementation
impl<T> AccountEffects for T where T: TimeEffects + ExecutionInfoEffects + CryptoEffects + ?Sized {}
