//! Identity Registry
//!
//! Stores GUIDs, never raw keys. The owner is always present; the guardian is
//! optional. Both mutators clear the escape slot unconditionally.

use crate::escape::{EscapeMachine, EscapeRecord};
use serde::{Deserialize, Serialize};
use warden_core::{Guid, Role, Signer, WardenError, WardenResult};

/// Current owner and guardian of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRegistry {
    owner: Guid,
    guardian: Option<Guid>,
}

impl IdentityRegistry {
    /// GUID a signer would be registered under
    pub fn register(signer: &Signer) -> Guid {
        signer.guid()
    }

    /// Registry for a freshly constructed account
    pub fn new(owner: &Signer, guardian: Option<&Signer>) -> WardenResult<Self> {
        owner.ensure_nonzero(Role::Owner)?;
        if let Some(guardian) = guardian {
            guardian.ensure_nonzero(Role::Guardian)?;
        }
        Ok(Self {
            owner: Self::register(owner),
            guardian: guardian.map(Self::register),
        })
    }

    /// Owner GUID
    pub fn current_owner(&self) -> Guid {
        self.owner
    }

    /// Guardian GUID, if one is configured
    pub fn current_guardian(&self) -> Option<Guid> {
        self.guardian
    }

    /// Whether `guid` is the owner
    pub fn is_owner(&self, guid: &Guid) -> bool {
        self.owner == *guid
    }

    /// Whether `guid` is the guardian
    pub fn is_guardian(&self, guid: &Guid) -> bool {
        self.guardian.as_ref() == Some(guid)
    }

    /// Owner GUIDs as a list (always exactly one)
    pub fn owner_guids(&self) -> Vec<Guid> {
        vec![self.owner]
    }

    /// Guardian GUIDs as a list (zero or one)
    pub fn guardian_guids(&self) -> Vec<Guid> {
        self.guardian.into_iter().collect()
    }

    /// Replace the owner and clear the escape slot
    ///
    /// Returns the record that was cleared, if any.
    pub(crate) fn set_owner(
        &mut self,
        owner: Guid,
        escape: &mut EscapeMachine,
    ) -> WardenResult<Option<EscapeRecord>> {
        if owner.is_zero() {
            return Err(WardenError::zero_signer(Role::NewOwner));
        }
        self.owner = owner;
        Ok(escape.clear())
    }

    /// Replace or remove the guardian and clear the escape slot
    pub(crate) fn set_guardian(
        &mut self,
        guardian: Option<Guid>,
        escape: &mut EscapeMachine,
    ) -> WardenResult<Option<EscapeRecord>> {
        if guardian.is_some_and(|guid| guid.is_zero()) {
            return Err(WardenError::zero_signer(Role::NewGuardian));
        }
        self.guardian = guardian;
        Ok(escape.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{AccountConfig, EscapeKind, Felt};

    fn owner() -> Signer {
        Signer::ed25519([1u8; 32])
    }

    fn guardian() -> Signer {
        Signer::ed25519([2u8; 32])
    }

    #[test]
    fn test_new_with_guardian() {
        let registry = IdentityRegistry::new(&owner(), Some(&guardian())).unwrap();
        assert_eq!(registry.owner_guids(), vec![owner().guid()]);
        assert_eq!(registry.guardian_guids(), vec![guardian().guid()]);
        assert!(registry.is_owner(&owner().guid()));
        assert!(!registry.is_owner(&guardian().guid()));
        assert!(registry.is_guardian(&guardian().guid()));
    }

    #[test]
    fn test_new_without_guardian() {
        let registry = IdentityRegistry::new(&owner(), None).unwrap();
        assert_eq!(registry.current_guardian(), None);
        assert!(registry.guardian_guids().is_empty());
        assert!(!registry.is_guardian(&guardian().guid()));
    }

    #[test]
    fn test_zero_keys_rejected() {
        let zero = Signer::ed25519([0u8; 32]);
        assert_eq!(
            IdentityRegistry::new(&zero, None),
            Err(WardenError::zero_signer(Role::Owner))
        );
        assert_eq!(
            IdentityRegistry::new(&owner(), Some(&zero)),
            Err(WardenError::zero_signer(Role::Guardian))
        );
    }

    #[test]
    fn test_mutators_clear_escape() {
        let mut registry = IdentityRegistry::new(&owner(), Some(&guardian())).unwrap();
        let mut escape = EscapeMachine::new(&AccountConfig::default());
        let record = escape.plan(EscapeKind::Owner, owner(), 0).unwrap();
        escape.install(record);

        let cleared = registry.set_guardian(None, &mut escape).unwrap();
        assert_eq!(cleared, Some(record));
        assert!(escape.stored().is_none());
        assert_eq!(registry.current_guardian(), None);

        let new_owner = Signer::ed25519([3u8; 32]).guid();
        assert_eq!(registry.set_owner(new_owner, &mut escape), Ok(None));
        assert_eq!(registry.current_owner(), new_owner);
    }

    #[test]
    fn test_mutators_reject_zero_guid() {
        let mut registry = IdentityRegistry::new(&owner(), None).unwrap();
        let mut escape = EscapeMachine::new(&AccountConfig::default());
        let zero = Guid::from(Felt::ZERO);
        assert!(registry.set_owner(zero, &mut escape).is_err());
        assert!(registry.set_guardian(Some(zero), &mut escape).is_err());
        assert_eq!(registry.current_owner(), owner().guid());
    }
}
