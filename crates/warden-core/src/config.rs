//! Account configuration
//!
//! The escape timelock and the generic transaction policy are fixed per
//! account at construction. Values can come from defaults or from a TOML
//! document:
//!
//! ```toml
//! security_period_secs = 604800
//! escape_expiry_secs = 604800
//! execution_policy = "owner_and_guardian"
//! ```

use crate::errors::{WardenError, WardenResult};
use serde::{Deserialize, Serialize};

/// Seven days, the default escape security period
pub const DEFAULT_SECURITY_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// Seven days, the default window during which a ready escape can complete
pub const DEFAULT_ESCAPE_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Who must sign ordinary (non-reset, non-escape) transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPolicy {
    /// The owner alone, whether or not a guardian is configured
    OwnerOnly,
    /// The owner, plus the guardian when one is configured
    #[default]
    OwnerAndGuardian,
}

/// Trait for configuration validation
pub trait ConfigValidation {
    /// Validate this configuration
    fn validate(&self) -> WardenResult<()>;
}

/// Per-account configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Delay between triggering an escape and it becoming completable
    pub security_period_secs: u64,
    /// How long a ready escape stays completable
    pub escape_expiry_secs: u64,
    /// Signer policy for ordinary transactions
    pub execution_policy: ExecutionPolicy,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            security_period_secs: DEFAULT_SECURITY_PERIOD_SECS,
            escape_expiry_secs: DEFAULT_ESCAPE_EXPIRY_SECS,
            execution_policy: ExecutionPolicy::default(),
        }
    }
}

impl AccountConfig {
    /// Parse and validate a TOML document; missing keys take defaults
    pub fn from_toml_str(input: &str) -> WardenResult<Self> {
        let config: AccountConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder-style override of the security period
    pub fn with_security_period(mut self, secs: u64) -> Self {
        self.security_period_secs = secs;
        self
    }

    /// Builder-style override of the expiry window
    pub fn with_escape_expiry(mut self, secs: u64) -> Self {
        self.escape_expiry_secs = secs;
        self
    }

    /// Builder-style override of the execution policy
    pub fn with_execution_policy(mut self, policy: ExecutionPolicy) -> Self {
        self.execution_policy = policy;
        self
    }
}

impl ConfigValidation for AccountConfig {
    fn validate(&self) -> WardenResult<()> {
        if self.security_period_secs == 0 {
            return Err(WardenError::config("security_period_secs must be nonzero"));
        }
        if self.escape_expiry_secs == 0 {
            return Err(WardenError::config("escape_expiry_secs must be nonzero"));
        }
        if self
            .security_period_secs
            .checked_add(self.escape_expiry_secs)
            .is_none()
        {
            return Err(WardenError::config(
                "security period plus expiry window overflows",
            ));
        }
        Ok(())
    }
}
