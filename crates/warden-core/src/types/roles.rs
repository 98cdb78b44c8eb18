//! Parties of an account and the two directions an escape can take.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Party whose key is involved in an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Current owner
    Owner,
    /// Current guardian
    Guardian,
    /// Owner being installed by a reset or escape
    NewOwner,
    /// Guardian being installed by a reset or escape
    NewGuardian,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Guardian => write!(f, "guardian"),
            Role::NewOwner => write!(f, "new owner"),
            Role::NewGuardian => write!(f, "new guardian"),
        }
    }
}

/// Which factor an escape replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscapeKind {
    /// The guardian replaces a lost owner key
    Owner,
    /// The owner replaces an uncooperative guardian
    Guardian,
}

impl EscapeKind {
    /// Role of the signer the escape installs
    pub fn target_role(&self) -> Role {
        match self {
            EscapeKind::Owner => Role::NewOwner,
            EscapeKind::Guardian => Role::NewGuardian,
        }
    }

    /// Wire tag used when an escape is returned as calldata
    pub fn wire_tag(&self) -> u64 {
        match self {
            EscapeKind::Owner => 1,
            EscapeKind::Guardian => 2,
        }
    }
}

impl fmt::Display for EscapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscapeKind::Owner => write!(f, "owner escape"),
            EscapeKind::Guardian => write!(f, "guardian escape"),
        }
    }
}
