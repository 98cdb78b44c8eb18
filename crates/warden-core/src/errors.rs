//! Unified error system for Warden accounts
//!
//! Every entry point of an account aborts with exactly one of these variants.
//! Nothing is recovered internally, so the variant a caller sees is the reason
//! the whole operation was rejected.

use crate::types::{EscapeKind, Role};
use serde::{Deserialize, Serialize};

/// Unified error type for all Warden operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WardenError {
    /// A calldata parameter could not be decoded (includes zero signers on the wire)
    #[error("Failed to deserialize param #{param}")]
    Deserialize {
        /// 1-based index of the offending parameter
        param: usize,
    },

    /// A signer with a zero public key was offered for a role
    #[error("Zero signer supplied for {role}")]
    ZeroSigner {
        /// Role the signer was meant to fill
        role: Role,
    },

    /// Invalid input that is not tied to a specific calldata parameter
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// A required party did not sign
    #[error("Missing signature from {party}")]
    MissingSignature {
        /// Party whose signature is absent
        party: Role,
    },

    /// A required party's signature failed verification
    #[error("Invalid signature from {party}")]
    InvalidSignature {
        /// Party whose signature was rejected
        party: Role,
    },

    /// The operation needs a guardian but none is configured
    #[error("Operation {operation} requires a guardian")]
    GuardianRequired {
        /// Operation that was attempted
        operation: String,
    },

    /// A signed recovery message is past its expiry
    #[error("Message expired at {expiry} (now {now})")]
    MessageExpired {
        /// Expiry timestamp carried by the message
        expiry: u64,
        /// Block timestamp at execution
        now: u64,
    },

    /// No live escape exists
    #[error("No active escape")]
    NoActiveEscape,

    /// The escape security period has not elapsed
    #[error("Escape not ready until {ready_at} (now {now})")]
    EscapeNotReady {
        /// Timestamp from which the escape can complete
        ready_at: u64,
        /// Block timestamp at execution
        now: u64,
    },

    /// The live escape targets the other factor
    #[error("Escape kind mismatch: expected {expected}, found {found}")]
    EscapeKindMismatch {
        /// Kind the completion call asked for
        expected: EscapeKind,
        /// Kind stored in the record
        found: EscapeKind,
    },

    /// Entry point does not exist or is not externally callable
    #[error("Entry point EntryPointSelector({selector}) not found in contract.")]
    EntryPointNotFound {
        /// Hex rendering of the entry point selector
        selector: String,
    },

    /// Account configuration is unusable
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Cryptographic capability failed (not a plain verification mismatch)
    #[error("Crypto error: {message}")]
    Crypto {
        /// Error message describing the cryptographic failure
        message: String,
    },
}

/// Coarse classification used by callers that only care about the failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Parameter shape or value rejected before authorization
    Validation,
    /// Missing or invalid signatures
    Authorization,
    /// Timing or state-machine violations
    Protocol,
    /// Unknown entry point
    NotFound,
    /// Bad configuration or broken capability
    Configuration,
}

impl WardenError {
    /// Create a parameter deserialization error
    pub fn deserialize(param: usize) -> Self {
        Self::Deserialize { param }
    }

    /// Create a zero signer error
    pub fn zero_signer(role: Role) -> Self {
        Self::ZeroSigner { role }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a missing signature error
    pub fn missing_signature(party: Role) -> Self {
        Self::MissingSignature { party }
    }

    /// Create an invalid signature error
    pub fn invalid_signature(party: Role) -> Self {
        Self::InvalidSignature { party }
    }

    /// Create a guardian required error
    pub fn guardian_required(operation: impl Into<String>) -> Self {
        Self::GuardianRequired {
            operation: operation.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a crypto error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Failure family of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Deserialize { .. } | Self::ZeroSigner { .. } | Self::Invalid { .. } => {
                ErrorCategory::Validation
            }
            Self::MissingSignature { .. }
            | Self::InvalidSignature { .. }
            | Self::GuardianRequired { .. } => ErrorCategory::Authorization,
            Self::MessageExpired { .. }
            | Self::NoActiveEscape
            | Self::EscapeNotReady { .. }
            | Self::EscapeKindMismatch { .. } => ErrorCategory::Protocol,
            Self::EntryPointNotFound { .. } => ErrorCategory::NotFound,
            Self::Config { .. } | Self::Crypto { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Standard Result type for Warden operations
pub type WardenResult<T> = std::result::Result<T, WardenError>;

impl From<toml::de::Error> for WardenError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
