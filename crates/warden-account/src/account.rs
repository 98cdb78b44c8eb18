//! Account facade
//!
//! `Account` owns the identity registry, the escape slot and the event log,
//! and holds its host effects by value. Every operation reads the host once,
//! validates everything, then commits; an `Err` leaves the account untouched.

use crate::escape::{EscapeMachine, EscapeRecord, EscapeStatus};
use crate::facts::AccountEvent;
use crate::recovery_message::ResetOwnersMessage;
use crate::registry::IdentityRegistry;
use crate::validator::{Authorization, Operation, SignatureValidator};
use warden_core::{
    AccountConfig, AccountEffects, ConfigValidation, EscapeKind, Felt, Guid, ParamReader, Role,
    Signer, SignerSignature, Timestamp, WardenResult,
};

/// Name reported by `get_name`
pub const ACCOUNT_NAME: &str = "WardenAccount";

/// Version reported by `get_version` as `(major, minor, patch)`
pub const ACCOUNT_VERSION: (u64, u64, u64) = (0, 1, 0);

/// A two-factor account
#[derive(Debug)]
pub struct Account<E: AccountEffects> {
    effects: E,
    config: AccountConfig,
    registry: IdentityRegistry,
    escape: EscapeMachine,
    events: Vec<AccountEvent>,
}

impl<E: AccountEffects> Account<E> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Construct an account with an owner and an optional guardian
    pub fn new(
        effects: E,
        config: AccountConfig,
        owner: Signer,
        guardian: Option<Signer>,
    ) -> WardenResult<Self> {
        config.validate()?;
        let registry = IdentityRegistry::new(&owner, guardian.as_ref())?;
        let escape = EscapeMachine::new(&config);

        tracing::info!(
            owner_guid = %registry.current_owner(),
            guardian_guid = ?registry.current_guardian(),
            "account created"
        );
        let created = AccountEvent::AccountCreated {
            owner_guid: registry.current_owner(),
            guardian_guid: registry.current_guardian(),
        };
        Ok(Self {
            effects,
            config,
            registry,
            escape,
            events: vec![created],
        })
    }

    /// Construct from constructor calldata `[owner: Signer, guardian: Option<Signer>]`
    pub fn deploy(effects: E, config: AccountConfig, calldata: &[Felt]) -> WardenResult<Self> {
        let mut params = ParamReader::new(calldata);
        let owner: Signer = params.param()?;
        let guardian: Option<Signer> = params.param()?;
        params.finish()?;
        Self::new(effects, config, owner, guardian)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Owner GUIDs (always exactly one)
    pub fn owner_guids(&self) -> Vec<Guid> {
        self.registry.owner_guids()
    }

    /// Guardian GUID, if configured
    pub fn guardian_guid(&self) -> Option<Guid> {
        self.registry.current_guardian()
    }

    /// Guardian GUIDs (zero or one)
    pub fn guardian_guids(&self) -> Vec<Guid> {
        self.registry.guardian_guids()
    }

    /// Whether `guid` is the owner
    pub fn is_owner_guid(&self, guid: &Guid) -> bool {
        self.registry.is_owner(guid)
    }

    /// Whether `guid` is the guardian
    pub fn is_guardian_guid(&self, guid: &Guid) -> bool {
        self.registry.is_guardian(guid)
    }

    /// The live escape, if any; expired records read as `None`
    pub fn escape(&self) -> Option<EscapeRecord> {
        self.escape.active(self.now()).copied()
    }

    /// Escape status at the current block time
    pub fn escape_status(&self) -> EscapeStatus {
        self.escape.status(self.now())
    }

    /// Configuration fixed at construction
    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    /// Events emitted so far
    pub fn events(&self) -> &[AccountEvent] {
        &self.events
    }

    /// Drain the event log
    pub fn take_events(&mut self) -> Vec<AccountEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Resets
    // =========================================================================

    /// Replace the owner
    ///
    /// The owner and, when configured, the guardian must sign the recovery
    /// message through the transaction signatures. `new_owner` carries the
    /// incoming owner's own signature over the same message.
    pub fn reset_owners(
        &mut self,
        new_owner: SignerSignature,
        expiry: Timestamp,
    ) -> WardenResult<()> {
        new_owner.signer.ensure_nonzero(Role::NewOwner)?;
        let now = self.now();
        let new_owner_guid = new_owner.guid();
        let message = ResetOwnersMessage::new(
            self.effects.chain_id(),
            self.effects.account_address(),
            new_owner_guid,
            expiry,
        );
        message.ensure_not_expired(now)?;

        let message_hash = message.hash();
        let transaction = self.effects.transaction();
        let validator = self.validator();
        validator.authorize(Operation::ResetOwners, &message_hash, &transaction.signatures)?;
        validator.verify(Role::NewOwner, &new_owner, &message_hash)?;

        let cleared = self.registry.set_owner(new_owner_guid, &mut self.escape)?;
        self.record_cancellation(cleared, now);
        tracing::info!(owner_guid = %new_owner_guid, "owner reset");
        self.events
            .push(AccountEvent::OwnerChanged { new_owner_guid });
        Ok(())
    }

    /// Replace the guardian, or remove it with `None`
    pub fn reset_guardians(&mut self, new_guardian: Option<Signer>) -> WardenResult<()> {
        if let Some(signer) = &new_guardian {
            signer.ensure_nonzero(Role::NewGuardian)?;
        }
        let now = self.now();
        self.authorize_transaction(Operation::ResetGuardians)?;

        let new_guardian_guid = new_guardian.as_ref().map(Signer::guid);
        let cleared = self
            .registry
            .set_guardian(new_guardian_guid, &mut self.escape)?;
        self.record_cancellation(cleared, now);
        tracing::info!(guardian_guid = ?new_guardian_guid, "guardian reset");
        self.events
            .push(AccountEvent::GuardianChanged { new_guardian_guid });
        Ok(())
    }

    // =========================================================================
    // Escapes
    // =========================================================================

    /// Guardian starts replacing the owner with `new_owner`
    pub fn trigger_escape_owner(&mut self, new_owner: Signer) -> WardenResult<()> {
        let record = self.trigger(EscapeKind::Owner, new_owner, Operation::TriggerEscapeOwner)?;
        self.events.push(AccountEvent::EscapeOwnerTriggered {
            new_owner,
            ready_at: record.ready_at,
        });
        Ok(())
    }

    /// Owner starts replacing the guardian with `new_guardian`
    pub fn trigger_escape_guardian(&mut self, new_guardian: Signer) -> WardenResult<()> {
        let record = self.trigger(
            EscapeKind::Guardian,
            new_guardian,
            Operation::TriggerEscapeGuardian,
        )?;
        self.events.push(AccountEvent::EscapeGuardianTriggered {
            new_guardian,
            ready_at: record.ready_at,
        });
        Ok(())
    }

    /// Guardian completes a ready owner escape
    pub fn escape_owner(&mut self) -> WardenResult<()> {
        let record = self.complete(EscapeKind::Owner, Operation::EscapeOwner)?;
        let new_owner_guid = record.new_signer.guid();
        self.registry.set_owner(new_owner_guid, &mut self.escape)?;
        tracing::info!(owner_guid = %new_owner_guid, "owner escaped");
        self.events
            .push(AccountEvent::OwnerEscaped { new_owner_guid });
        Ok(())
    }

    /// Owner completes a ready guardian escape
    pub fn escape_guardian(&mut self) -> WardenResult<()> {
        let record = self.complete(EscapeKind::Guardian, Operation::EscapeGuardian)?;
        let new_guardian_guid = record.new_signer.guid();
        self.registry
            .set_guardian(Some(new_guardian_guid), &mut self.escape)?;
        tracing::info!(guardian_guid = %new_guardian_guid, "guardian escaped");
        self.events
            .push(AccountEvent::GuardianEscaped { new_guardian_guid });
        Ok(())
    }

    // =========================================================================
    // Generic transactions
    // =========================================================================

    /// Check the current transaction against the execution policy
    pub fn validate_transaction(&self) -> WardenResult<Authorization> {
        self.authorize_transaction(Operation::Execute)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn now(&self) -> Timestamp {
        self.effects.block_timestamp()
    }

    fn validator(&self) -> SignatureValidator<'_, E> {
        SignatureValidator::new(&self.registry, &self.effects, self.config.execution_policy)
    }

    /// Authorize `operation` over the transaction hash
    fn authorize_transaction(&self, operation: Operation) -> WardenResult<Authorization> {
        let transaction = self.effects.transaction();
        self.validator().authorize(
            operation,
            &transaction.transaction_hash,
            &transaction.signatures,
        )
    }

    fn trigger(
        &mut self,
        kind: EscapeKind,
        new_signer: Signer,
        operation: Operation,
    ) -> WardenResult<EscapeRecord> {
        let record = self.escape.plan(kind, new_signer, self.now())?;
        self.authorize_transaction(operation)?;

        if let Some(previous) = self.escape.install(record) {
            tracing::debug!(previous = %previous.kind, "escape overwritten");
        }
        tracing::info!(
            escape = %kind,
            new_signer_guid = %new_signer.guid(),
            ready_at = record.ready_at,
            expires_at = record.expires_at,
            "escape triggered"
        );
        Ok(record)
    }

    fn complete(&self, kind: EscapeKind, operation: Operation) -> WardenResult<EscapeRecord> {
        self.authorize_transaction(operation)?;
        self.escape.ready_record(kind, self.now())
    }

    /// Emit `EscapeCanceled` when a reset discarded a live escape
    fn record_cancellation(&mut self, cleared: Option<EscapeRecord>, now: Timestamp) {
        if let Some(record) = cleared.filter(|record| !record.is_stale(now)) {
            let new_signer_guid = record.new_signer.guid();
            tracing::info!(escape = %record.kind, %new_signer_guid, "escape canceled");
            self.events
                .push(AccountEvent::EscapeCanceled { new_signer_guid });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use warden_core::{
        ChainId, ContractAddress, CryptoEffects, Encode, ExecutionInfoEffects, Hash32,
        SignatureSchemes, TimeEffects, TransactionInfo, WardenError,
    };
    use warden_testkit::KeyTestFixture;

    /// Minimal host with fixed chain and address
    #[derive(Debug, Default)]
    struct StaticHost {
        now: Timestamp,
        transaction: TransactionInfo,
        schemes: SignatureSchemes,
    }

    impl TimeEffects for StaticHost {
        fn block_timestamp(&self) -> Timestamp {
            self.now
        }
    }

    impl ExecutionInfoEffects for StaticHost {
        fn chain_id(&self) -> ChainId {
            ChainId(Felt::from(7u64))
        }

        fn account_address(&self) -> ContractAddress {
            ContractAddress(Felt::from(0xacc0u64))
        }

        fn transaction(&self) -> TransactionInfo {
            self.transaction.clone()
        }
    }

    impl CryptoEffects for StaticHost {
        fn verify_signature(
            &self,
            signer: &Signer,
            message: &Hash32,
            signature: &[u8],
        ) -> WardenResult<bool> {
            self.schemes.verify_signature(signer, message, signature)
        }
    }

    fn owner() -> KeyTestFixture {
        KeyTestFixture::from_seed(&[1u8; 32])
    }

    fn guardian() -> KeyTestFixture {
        KeyTestFixture::from_seed(&[2u8; 32])
    }

    fn account() -> Account<StaticHost> {
        Account::new(
            StaticHost::default(),
            AccountConfig::default(),
            owner().signer(),
            Some(guardian().signer()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_emits_created_event() {
        let account = account();
        assert_eq!(
            account.events(),
            &[AccountEvent::AccountCreated {
                owner_guid: owner().signer().guid(),
                guardian_guid: Some(guardian().signer().guid()),
            }]
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AccountConfig::default().with_security_period(0);
        let result = Account::new(StaticHost::default(), config, owner().signer(), None);
        assert_matches!(result, Err(WardenError::Config { .. }));
    }

    #[test]
    fn test_deploy_decodes_constructor_params() {
        let mut calldata = owner().signer().to_calldata();
        calldata.extend(Some(guardian().signer()).to_calldata());
        let account =
            Account::deploy(StaticHost::default(), AccountConfig::default(), &calldata).unwrap();
        assert_eq!(account.guardian_guid(), Some(guardian().signer().guid()));

        calldata.push(Felt::ONE);
        let err = Account::deploy(StaticHost::default(), AccountConfig::default(), &calldata)
            .unwrap_err();
        assert_eq!(err, WardenError::deserialize(3));
    }

    #[test]
    fn test_failed_operation_leaves_no_trace() {
        let mut account = account();
        account.take_events();
        let err = account.reset_guardians(None).unwrap_err();
        assert_eq!(err, WardenError::missing_signature(Role::Owner));
        assert!(account.events().is_empty());
        assert_eq!(account.guardian_guid(), Some(guardian().signer().guid()));
    }

    #[test]
    fn test_reset_guardians_with_owner_signature() {
        let mut account = account();
        let hash = Hash32::from_bytes(b"tx");
        account.effects.transaction = TransactionInfo::new(hash, vec![owner().sign(&hash)]);

        account.reset_guardians(None).unwrap();
        assert!(account.guardian_guids().is_empty());
        assert_eq!(
            account.events().last(),
            Some(&AccountEvent::GuardianChanged {
                new_guardian_guid: None
            })
        );
    }

    #[test]
    fn test_reset_owners_rejects_expired_message_before_signatures() {
        let mut account = account();
        account.effects.now = 50;
        let new_owner = KeyTestFixture::from_seed(&[3u8; 32]);
        let proof = new_owner.sign(&Hash32::default());
        assert_eq!(
            account.reset_owners(proof, 50),
            Err(WardenError::MessageExpired { expiry: 50, now: 50 })
        );
    }
}
