//! Signature Validator
//!
//! Each operation names the parties that must sign. For every required party
//! the validator looks for the first supplied signature whose signer GUID is
//! that party's registered GUID and verifies it over the message hash with
//! the scheme for the signer's key type. Signatures from anyone else are
//! ignored.

use crate::registry::IdentityRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use warden_core::{
    CryptoEffects, ExecutionPolicy, Guid, Hash32, Role, SignerSignature, WardenError, WardenResult,
};

/// Operations that carry their own signer requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Replace the owner via a signed recovery message
    ResetOwners,
    /// Replace or remove the guardian
    ResetGuardians,
    /// Guardian starts replacing the owner
    TriggerEscapeOwner,
    /// Owner starts replacing the guardian
    TriggerEscapeGuardian,
    /// Guardian completes an owner escape
    EscapeOwner,
    /// Owner completes a guardian escape
    EscapeGuardian,
    /// Any other transaction, governed by the execution policy
    Execute,
}

impl Operation {
    /// Entry point style name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ResetOwners => "reset_owners",
            Operation::ResetGuardians => "reset_guardians",
            Operation::TriggerEscapeOwner => "trigger_escape_owner",
            Operation::TriggerEscapeGuardian => "trigger_escape_guardian",
            Operation::EscapeOwner => "escape_owner",
            Operation::EscapeGuardian => "escape_guardian",
            Operation::Execute => "execute",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Proof that an operation's signer requirements were met
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    /// Operation that was authorized
    pub operation: Operation,
    /// Parties whose signatures were verified, in check order
    pub signers: Vec<(Role, Guid)>,
}

impl Authorization {
    /// Whether `role` signed
    pub fn signed_by(&self, role: Role) -> bool {
        self.signers.iter().any(|(signed, _)| *signed == role)
    }
}

/// Checks supplied signatures against the registry for one operation
#[derive(Debug)]
pub struct SignatureValidator<'a, C: CryptoEffects + ?Sized> {
    registry: &'a IdentityRegistry,
    crypto: &'a C,
    policy: ExecutionPolicy,
}

impl<'a, C: CryptoEffects + ?Sized> SignatureValidator<'a, C> {
    /// Validator over the current registry state
    pub fn new(registry: &'a IdentityRegistry, crypto: &'a C, policy: ExecutionPolicy) -> Self {
        Self {
            registry,
            crypto,
            policy,
        }
    }

    /// Parties that must sign `operation`, with their registered GUIDs
    pub fn required_parties(&self, operation: Operation) -> WardenResult<Vec<(Role, Guid)>> {
        let owner = (Role::Owner, self.registry.current_owner());
        let guardian = self
            .registry
            .current_guardian()
            .map(|guid| (Role::Guardian, guid));
        let guardian_required = || {
            guardian.ok_or_else(|| WardenError::guardian_required(operation.name()))
        };

        let parties: Vec<(Role, Guid)> = match operation {
            Operation::ResetOwners => std::iter::once(owner).chain(guardian).collect(),
            Operation::ResetGuardians | Operation::EscapeGuardian => vec![owner],
            Operation::TriggerEscapeGuardian => {
                // There is nothing to escape from without a guardian
                guardian_required()?;
                vec![owner]
            }
            Operation::TriggerEscapeOwner | Operation::EscapeOwner => vec![guardian_required()?],
            Operation::Execute => match self.policy {
                ExecutionPolicy::OwnerOnly => vec![owner],
                ExecutionPolicy::OwnerAndGuardian => {
                    std::iter::once(owner).chain(guardian).collect()
                }
            },
        };
        Ok(parties)
    }

    /// Verify that every required party signed `message`
    pub fn authorize(
        &self,
        operation: Operation,
        message: &Hash32,
        signatures: &[SignerSignature],
    ) -> WardenResult<Authorization> {
        let parties = self.required_parties(operation)?;
        for (role, guid) in &parties {
            let supplied = signatures
                .iter()
                .find(|signature| signature.guid() == *guid)
                .ok_or_else(|| {
                    tracing::warn!(%operation, party = %role, "required signature missing");
                    WardenError::missing_signature(*role)
                })?;
            self.verify(*role, supplied, message)?;
        }
        tracing::debug!(%operation, parties = parties.len(), "operation authorized");
        Ok(Authorization {
            operation,
            signers: parties,
        })
    }

    /// Verify one signature on behalf of `role`
    pub fn verify(
        &self,
        role: Role,
        signature: &SignerSignature,
        message: &Hash32,
    ) -> WardenResult<()> {
        let valid =
            self.crypto
                .verify_signature(&signature.signer, message, &signature.signature)?;
        if !valid {
            tracing::warn!(party = %role, signer = %signature.guid(), "signature rejected");
            return Err(WardenError::invalid_signature(role));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use warden_core::{SignatureSchemes, Signer};
    use warden_testkit::KeyTestFixture;

    struct Parties {
        owner: KeyTestFixture,
        guardian: KeyTestFixture,
        stranger: KeyTestFixture,
    }

    fn test_parties() -> Parties {
        Parties {
            owner: KeyTestFixture::from_seed_string("owner"),
            guardian: KeyTestFixture::from_seed_string("guardian"),
            stranger: KeyTestFixture::from_seed_string("stranger"),
        }
    }

    fn message() -> Hash32 {
        Hash32::from_bytes(b"transaction")
    }

    fn registry(parties: &Parties, with_guardian: bool) -> IdentityRegistry {
        let guardian = parties.guardian.signer();
        IdentityRegistry::new(&parties.owner.signer(), with_guardian.then_some(&guardian))
            .unwrap()
    }

    #[test]
    fn test_reset_owners_needs_both_parties() {
        let parties = test_parties();
        let registry = registry(&parties, true);
        let schemes = SignatureSchemes::default();
        let validator =
            SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerAndGuardian);

        let only_owner = vec![parties.owner.sign(&message())];
        assert_eq!(
            validator.authorize(Operation::ResetOwners, &message(), &only_owner),
            Err(WardenError::missing_signature(Role::Guardian))
        );

        let both = vec![
            parties.guardian.sign(&message()),
            parties.owner.sign(&message()),
        ];
        let auth = validator
            .authorize(Operation::ResetOwners, &message(), &both)
            .unwrap();
        assert!(auth.signed_by(Role::Owner));
        assert!(auth.signed_by(Role::Guardian));
    }

    #[test]
    fn test_reset_owners_without_guardian_is_owner_only() {
        let parties = test_parties();
        let registry = registry(&parties, false);
        let schemes = SignatureSchemes::default();
        let validator =
            SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerAndGuardian);
        let auth = validator
            .authorize(
                Operation::ResetOwners,
                &message(),
                &[parties.owner.sign(&message())],
            )
            .unwrap();
        assert_eq!(
            auth.signers,
            vec![(Role::Owner, parties.owner.signer().guid())]
        );
    }

    #[test]
    fn test_invalid_signature_is_distinct_from_missing() {
        let parties = test_parties();
        let registry = registry(&parties, true);
        let schemes = SignatureSchemes::default();
        let validator =
            SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerAndGuardian);

        let wrong_message = Hash32::from_bytes(b"other");
        let signatures = vec![parties.guardian.sign(&wrong_message)];
        assert_eq!(
            validator.authorize(Operation::TriggerEscapeOwner, &message(), &signatures),
            Err(WardenError::invalid_signature(Role::Guardian))
        );
    }

    #[test]
    fn test_extra_signatures_are_ignored() {
        let parties = test_parties();
        let registry = registry(&parties, true);
        let schemes = SignatureSchemes::default();
        let validator =
            SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerAndGuardian);

        let signatures = vec![
            parties.stranger.sign(&message()),
            parties.owner.sign(&message()),
            parties.guardian.sign(&message()),
        ];
        assert!(validator
            .authorize(Operation::ResetGuardians, &message(), &signatures)
            .is_ok());
    }

    #[test]
    fn test_first_matching_signature_wins() {
        let parties = test_parties();
        let registry = registry(&parties, false);
        let schemes = SignatureSchemes::default();
        let validator =
            SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerAndGuardian);

        let bad = parties.owner.sign(&Hash32::from_bytes(b"other"));
        let good = parties.owner.sign(&message());
        assert_eq!(
            validator.authorize(Operation::ResetGuardians, &message(), &[bad, good]),
            Err(WardenError::invalid_signature(Role::Owner))
        );
    }

    #[test]
    fn test_guardian_operations_need_a_guardian() {
        let parties = test_parties();
        let registry = registry(&parties, false);
        let schemes = SignatureSchemes::default();
        let validator =
            SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerAndGuardian);

        for operation in [
            Operation::TriggerEscapeOwner,
            Operation::TriggerEscapeGuardian,
            Operation::EscapeOwner,
        ] {
            assert_matches!(
                validator.authorize(operation, &message(), &[parties.owner.sign(&message())]),
                Err(WardenError::GuardianRequired { .. })
            );
        }
    }

    #[test]
    fn test_execution_policy() {
        let parties = test_parties();
        let registry = registry(&parties, true);
        let schemes = SignatureSchemes::default();
        let owner_only = vec![parties.owner.sign(&message())];

        let strict =
            SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerAndGuardian);
        assert_eq!(
            strict.authorize(Operation::Execute, &message(), &owner_only),
            Err(WardenError::missing_signature(Role::Guardian))
        );

        let relaxed = SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerOnly);
        assert!(relaxed
            .authorize(Operation::Execute, &message(), &owner_only)
            .is_ok());
    }

    #[test]
    fn test_signature_claiming_owner_key_must_verify() {
        let parties = test_parties();
        let registry = registry(&parties, false);
        let schemes = SignatureSchemes::default();
        let validator =
            SignatureValidator::new(&registry, &schemes, ExecutionPolicy::OwnerOnly);

        // The stranger claims the owner's key but signs with their own
        let mut forged = parties.stranger.sign(&message());
        forged.signer = Signer::ed25519(parties.owner.public_key_bytes());
        assert_eq!(
            validator.authorize(Operation::Execute, &message(), &[forged]),
            Err(WardenError::invalid_signature(Role::Owner))
        );
    }
}
