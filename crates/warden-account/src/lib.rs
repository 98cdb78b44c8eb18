//! # Warden Account - Owner/guardian account with escape recovery
//!
//! This crate implements the account core: who the account belongs to, which
//! signatures each operation needs, and how either factor can replace the
//! other after a timelock.
//!
//! ## Architecture Constraints
//!
//! This crate depends on:
//! - **warden-core**: wire words, identifiers, signers, errors, effects, config
//!
//! Host services (block clock, execution info, signature verification) are
//! consumed only through `warden_core::AccountEffects`.
//!
//! ## What Belongs Here
//!
//! - Identity registry (current owner and optional guardian GUIDs)
//! - Signature validator (per-operation signer requirements)
//! - Recovery message layout for owner resets
//! - Escape state machine (security period, expiry window)
//! - The `Account` facade and its entry point dispatcher
//! - Account events
//!
//! ## What Does NOT Belong Here
//!
//! - Signature algorithms (pluggable `SignatureScheme` in warden-core)
//! - Deployment, address derivation, fee handling
//! - Test doubles (see warden-testkit)
//!
//! ## Design Principles
//!
//! - Every operation validates fully before mutating anything
//! - At most one owner, at most one guardian, at most one escape
//! - Any successful reset cancels an in-flight escape
//! - Time only comes from the host block clock
//!
//! ## Key Operations
//!
//! - **Reset owners**: owner and guardian co-sign a replay-bound message
//! - **Reset guardians**: owner replaces or removes the guardian
//! - **Escape owner**: guardian replaces a lost owner key after a delay
//! - **Escape guardian**: owner replaces an uncooperative guardian after a delay

#![forbid(unsafe_code)]

/// Account facade and operations
pub mod account;
/// Entry point dispatch over calldata
pub mod entrypoints;
/// Escape state machine
pub mod escape;
/// Account events
pub mod facts;
/// Recovery message for owner resets
pub mod recovery_message;
/// Owner and guardian identity registry
pub mod registry;
/// Per-operation signature requirements
pub mod validator;

pub use account::{Account, ACCOUNT_NAME, ACCOUNT_VERSION};
pub use entrypoints::{selector, EntryPoint};
pub use escape::{EscapeMachine, EscapeRecord, EscapeStatus};
pub use facts::AccountEvent;
pub use recovery_message::{ResetOwnersMessage, RESET_OWNERS_TAG};
pub use registry::IdentityRegistry;
pub use validator::{Authorization, Operation, SignatureValidator};

pub use warden_core::{WardenError, WardenResult};
