//! Entry point dispatch
//!
//! Hosts call the account by entry point name with flat calldata. The
//! dispatcher decodes parameters in order, runs the typed operation and
//! encodes the return value. Unknown names, and `constructor` after
//! deployment, are reported by selector.

use crate::account::{Account, ACCOUNT_NAME, ACCOUNT_VERSION};
use sha3::{Digest, Keccak256};
use std::fmt;
use warden_core::{
    AccountEffects, Encode, Felt, Guid, ParamReader, Signer, SignerSignature, Timestamp,
    WardenError, WardenResult,
};

/// Selector of an entry point: `Keccak256(name)` masked to its low 250 bits
pub fn selector(name: &str) -> Felt {
    let digest = Keccak256::digest(name.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    bytes[0] &= 0x03;
    Felt::from_bytes_be(bytes)
}

/// Externally callable entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `reset_owners`
    ResetOwners,
    /// `reset_guardians`
    ResetGuardians,
    /// `trigger_escape_owner`
    TriggerEscapeOwner,
    /// `trigger_escape_guardian`
    TriggerEscapeGuardian,
    /// `escape_owner`
    EscapeOwner,
    /// `escape_guardian`
    EscapeGuardian,
    /// `get_owners_guids`
    GetOwnersGuids,
    /// `get_guardian_guid`
    GetGuardianGuid,
    /// `get_guardians_guids`
    GetGuardiansGuids,
    /// `is_owner_guid`
    IsOwnerGuid,
    /// `is_guardian_guid`
    IsGuardianGuid,
    /// `get_escape`
    GetEscape,
    /// `get_escape_status`
    GetEscapeStatus,
    /// `get_name`
    GetName,
    /// `get_version`
    GetVersion,
}

impl EntryPoint {
    /// Every exposed entry point
    pub const ALL: [EntryPoint; 15] = [
        EntryPoint::ResetOwners,
        EntryPoint::ResetGuardians,
        EntryPoint::TriggerEscapeOwner,
        EntryPoint::TriggerEscapeGuardian,
        EntryPoint::EscapeOwner,
        EntryPoint::EscapeGuardian,
        EntryPoint::GetOwnersGuids,
        EntryPoint::GetGuardianGuid,
        EntryPoint::GetGuardiansGuids,
        EntryPoint::IsOwnerGuid,
        EntryPoint::IsGuardianGuid,
        EntryPoint::GetEscape,
        EntryPoint::GetEscapeStatus,
        EntryPoint::GetName,
        EntryPoint::GetVersion,
    ];

    /// Name hosts call this entry point by
    pub fn name(&self) -> &'static str {
        match self {
            EntryPoint::ResetOwners => "reset_owners",
            EntryPoint::ResetGuardians => "reset_guardians",
            EntryPoint::TriggerEscapeOwner => "trigger_escape_owner",
            EntryPoint::TriggerEscapeGuardian => "trigger_escape_guardian",
            EntryPoint::EscapeOwner => "escape_owner",
            EntryPoint::EscapeGuardian => "escape_guardian",
            EntryPoint::GetOwnersGuids => "get_owners_guids",
            EntryPoint::GetGuardianGuid => "get_guardian_guid",
            EntryPoint::GetGuardiansGuids => "get_guardians_guids",
            EntryPoint::IsOwnerGuid => "is_owner_guid",
            EntryPoint::IsGuardianGuid => "is_guardian_guid",
            EntryPoint::GetEscape => "get_escape",
            EntryPoint::GetEscapeStatus => "get_escape_status",
            EntryPoint::GetName => "get_name",
            EntryPoint::GetVersion => "get_version",
        }
    }

    /// Resolve a name; `None` for anything not exposed
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|entry| entry.name() == name)
    }

    /// Read-only entry point
    pub fn is_view(&self) -> bool {
        !matches!(
            self,
            EntryPoint::ResetOwners
                | EntryPoint::ResetGuardians
                | EntryPoint::TriggerEscapeOwner
                | EntryPoint::TriggerEscapeGuardian
                | EntryPoint::EscapeOwner
                | EntryPoint::EscapeGuardian
        )
    }

    /// Selector of this entry point
    pub fn selector(&self) -> Felt {
        selector(self.name())
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<E: AccountEffects> Account<E> {
    /// Call an entry point by name with raw calldata
    pub fn invoke(&mut self, name: &str, calldata: &[Felt]) -> WardenResult<Vec<Felt>> {
        let entry = EntryPoint::from_name(name).ok_or_else(|| {
            let selector = selector(name).to_hex();
            tracing::debug!(name, %selector, "unknown entry point");
            WardenError::EntryPointNotFound { selector }
        })?;
        let mut params = ParamReader::new(calldata);

        let output = match entry {
            EntryPoint::ResetOwners => {
                let new_owner: SignerSignature = params.param()?;
                let expiry: Timestamp = params.param()?;
                params.finish()?;
                self.reset_owners(new_owner, expiry)?;
                Vec::new()
            }
            EntryPoint::ResetGuardians => {
                let new_guardian: Option<Signer> = params.param()?;
                params.finish()?;
                self.reset_guardians(new_guardian)?;
                Vec::new()
            }
            EntryPoint::TriggerEscapeOwner => {
                let new_owner: Signer = params.param()?;
                params.finish()?;
                self.trigger_escape_owner(new_owner)?;
                Vec::new()
            }
            EntryPoint::TriggerEscapeGuardian => {
                let new_guardian: Signer = params.param()?;
                params.finish()?;
                self.trigger_escape_guardian(new_guardian)?;
                Vec::new()
            }
            EntryPoint::EscapeOwner => {
                params.finish()?;
                self.escape_owner()?;
                Vec::new()
            }
            EntryPoint::EscapeGuardian => {
                params.finish()?;
                self.escape_guardian()?;
                Vec::new()
            }
            EntryPoint::GetOwnersGuids => {
                params.finish()?;
                self.owner_guids().to_calldata()
            }
            EntryPoint::GetGuardianGuid => {
                params.finish()?;
                self.guardian_guid().to_calldata()
            }
            EntryPoint::GetGuardiansGuids => {
                params.finish()?;
                self.guardian_guids().to_calldata()
            }
            EntryPoint::IsOwnerGuid => {
                let guid: Guid = params.param()?;
                params.finish()?;
                self.is_owner_guid(&guid).to_calldata()
            }
            EntryPoint::IsGuardianGuid => {
                let guid: Guid = params.param()?;
                params.finish()?;
                self.is_guardian_guid(&guid).to_calldata()
            }
            EntryPoint::GetEscape => {
                params.finish()?;
                self.escape().to_calldata()
            }
            EntryPoint::GetEscapeStatus => {
                params.finish()?;
                self.escape_status().to_calldata()
            }
            EntryPoint::GetName => {
                params.finish()?;
                vec![Felt::from_short_string(ACCOUNT_NAME)?]
            }
            EntryPoint::GetVersion => {
                params.finish()?;
                let (major, minor, patch) = ACCOUNT_VERSION;
                vec![Felt::from(major), Felt::from(minor), Felt::from(patch)]
            }
        };
        Ok(output)
    }
}
