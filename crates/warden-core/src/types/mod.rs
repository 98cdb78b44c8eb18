//! Core domain types.

pub mod identifiers;
pub mod roles;
pub mod signer;

pub use identifiers::{ChainId, ContractAddress, Guid, Hash32};
pub use roles::{EscapeKind, Role};
pub use signer::{Signer, SignerSignature, SignerType};
