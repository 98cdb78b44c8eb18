//! # Warden Core - Foundation types for two-factor accounts
//!
//! This crate holds everything the account core needs that is not account
//! logic itself.
//!
//! ## What Belongs Here
//!
//! - Wire words (`Felt`) and the calldata codec
//! - Identifier types: `Hash32`, `Guid`, `ChainId`, `ContractAddress`
//! - Signers, signer types and their GUID derivation
//! - The unified `WardenError` and `WardenResult`
//! - Hashing and pluggable signature schemes
//! - Host effect traits (block clock, execution info, signature verification)
//! - Account configuration
//!
//! ## What Does NOT Belong Here
//!
//! - Authorization policy, the escape state machine, entry points
//!   (see `warden-account`)
//! - Test doubles for effects (see `warden-testkit`)

#![forbid(unsafe_code)]

pub mod calldata;
pub mod config;
pub mod crypto;
pub mod effects;
pub mod errors;
pub mod felt;
pub mod types;

pub use calldata::{Decode, DecodeError, Encode, ParamReader};
pub use config::{AccountConfig, ConfigValidation, ExecutionPolicy};
pub use crypto::{Ed25519Scheme, SignatureScheme, SignatureSchemes};
pub use effects::{
    AccountEffects, CryptoEffects, ExecutionInfoEffects, TimeEffects, Timestamp, TransactionInfo,
};
pub use errors::{ErrorCategory, WardenError, WardenResult};
pub use felt::Felt;
pub use types::{
    ChainId, ContractAddress, EscapeKind, Guid, Hash32, Role, Signer, SignerSignature, SignerType,
};
