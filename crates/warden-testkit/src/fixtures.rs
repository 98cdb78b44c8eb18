//! Deployed account fixtures
//!
//! An `AccountFixture` bundles a deployed account with the keys that control
//! it and a handle on its host.

use crate::host::MockHost;
use crate::keys::KeyTestFixture;
use warden_account::{Account, ResetOwnersMessage};
use warden_core::{AccountConfig, ExecutionInfoEffects, SignerSignature, Timestamp};

/// A deployed account plus its owner, guardian and host
#[derive(Debug)]
pub struct AccountFixture {
    /// Host handle shared with the account
    pub host: MockHost,
    /// Current owner key
    pub owner: KeyTestFixture,
    /// Guardian key, `None` when deployed without one
    pub guardian: Option<KeyTestFixture>,
    /// The account under test
    pub account: Account<MockHost>,
}

impl AccountFixture {
    /// Account with an owner and a guardian and default configuration
    pub fn deploy_account() -> Self {
        Self::deploy_account_with_config(AccountConfig::default())
    }

    /// Account with an owner and a guardian
    pub fn deploy_account_with_config(config: AccountConfig) -> Self {
        Self::deploy(
            config,
            KeyTestFixture::from_seed_string("owner"),
            Some(KeyTestFixture::from_seed_string("guardian")),
        )
    }

    /// Account with an owner only
    pub fn deploy_account_without_guardian() -> Self {
        Self::deploy(
            AccountConfig::default(),
            KeyTestFixture::from_seed_string("owner"),
            None,
        )
    }

    fn deploy(
        config: AccountConfig,
        owner: KeyTestFixture,
        guardian: Option<KeyTestFixture>,
    ) -> Self {
        crate::init_test_tracing();
        let host = MockHost::new();
        let account = Account::new(
            host.clone(),
            config,
            owner.signer(),
            guardian.as_ref().map(KeyTestFixture::signer),
        )
        .expect("fixture keys are nonzero");
        tracing::debug!(
            owner_guid = %owner.guid(),
            with_guardian = guardian.is_some(),
            "fixture account deployed"
        );
        Self {
            host,
            owner,
            guardian,
            account,
        }
    }

    /// Guardian key; panics for accounts deployed without one
    pub fn guardian(&self) -> &KeyTestFixture {
        self.guardian.as_ref().expect("fixture has a guardian")
    }

    /// Start a transaction signed by `signers`
    pub fn sign_with(&self, signers: &[&KeyTestFixture]) {
        self.host.sign_with(signers);
    }

    /// Recovery message installing `new_owner` on this account
    pub fn reset_owners_message(
        &self,
        new_owner: &KeyTestFixture,
        expiry: Timestamp,
    ) -> ResetOwnersMessage {
        ResetOwnersMessage::new(
            self.host.chain_id(),
            self.host.account_address(),
            new_owner.guid(),
            expiry,
        )
    }

    /// Prepare a `reset_owners` call
    ///
    /// The owner and the guardian (when present) sign the recovery message
    /// as transaction signatures. Returns the new owner's own signature, the
    /// first parameter of `reset_owners`.
    pub fn sign_reset_owners(
        &self,
        new_owner: &KeyTestFixture,
        expiry: Timestamp,
    ) -> SignerSignature {
        let message = self.reset_owners_message(new_owner, expiry).hash();
        let mut signers = vec![&self.owner];
        signers.extend(self.guardian.as_ref());
        self.host.sign_message_with(message, &signers);
        new_owner.sign(&message)
    }

    /// Block time one day from now, a convenient message expiry
    pub fn expiry_in_one_day(&self) -> Timestamp {
        self.host.clock().now() + 24 * 60 * 60
    }
}
