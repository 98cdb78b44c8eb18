//! Account events
//!
//! Every committed state change appends one or more events to the account's
//! log. Rejected operations append nothing. The log can be read in place or
//! drained by the host.

use serde::{Deserialize, Serialize};
use warden_core::{Guid, Signer, Timestamp};

/// Account event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    // ========================================================================
    // Identity
    // ========================================================================
    /// Account constructed
    AccountCreated {
        /// Initial owner
        owner_guid: Guid,
        /// Initial guardian, if any
        guardian_guid: Option<Guid>,
    },
    /// Owner replaced by `reset_owners`
    OwnerChanged {
        /// Installed owner
        new_owner_guid: Guid,
    },
    /// Guardian replaced or removed by `reset_guardians`
    GuardianChanged {
        /// Installed guardian, `None` when removed
        new_guardian_guid: Option<Guid>,
    },

    // ========================================================================
    // Escape Lifecycle
    // ========================================================================
    /// Guardian started replacing the owner
    EscapeOwnerTriggered {
        /// Candidate owner
        new_owner: Signer,
        /// When the escape becomes completable
        ready_at: Timestamp,
    },
    /// Owner started replacing the guardian
    EscapeGuardianTriggered {
        /// Candidate guardian
        new_guardian: Signer,
        /// When the escape becomes completable
        ready_at: Timestamp,
    },
    /// Owner escape completed
    OwnerEscaped {
        /// Installed owner
        new_owner_guid: Guid,
    },
    /// Guardian escape completed
    GuardianEscaped {
        /// Installed guardian
        new_guardian_guid: Guid,
    },
    /// A live escape was discarded by a reset
    EscapeCanceled {
        /// Candidate of the discarded escape
        new_signer_guid: Guid,
    },
}

impl AccountEvent {
    /// Get the sub-type string for this event variant
    pub fn sub_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountCreated { .. } => "account-created",
            AccountEvent::OwnerChanged { .. } => "owner-changed",
            AccountEvent::GuardianChanged { .. } => "guardian-changed",
            AccountEvent::EscapeOwnerTriggered { .. } => "escape-owner-triggered",
            AccountEvent::EscapeGuardianTriggered { .. } => "escape-guardian-triggered",
            AccountEvent::OwnerEscaped { .. } => "owner-escaped",
            AccountEvent::GuardianEscaped { .. } => "guardian-escaped",
            AccountEvent::EscapeCanceled { .. } => "escape-canceled",
        }
    }

    /// Whether this event changed who controls the account
    pub fn changes_identity(&self) -> bool {
        matches!(
            self,
            AccountEvent::OwnerChanged { .. }
                | AccountEvent::GuardianChanged { .. }
                | AccountEvent::OwnerEscaped { .. }
                | AccountEvent::GuardianEscaped { .. }
        )
    }
}
