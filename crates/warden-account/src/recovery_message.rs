//! Recovery message for owner resets
//!
//! Owner resets are authorized over a message bound to the chain, the account
//! and the incoming owner, with a caller-chosen expiry. Layout (136 bytes,
//! hashed with SHA-256):
//!
//! ```text
//! [0..32)    protocol tag, ASCII, zero padded on the right
//! [32..64)   chain id
//! [64..96)   account address
//! [96..128)  new owner GUID
//! [128..136) expiry timestamp, u64 big-endian
//! ```

use serde::{Deserialize, Serialize};
use warden_core::{ChainId, ContractAddress, Guid, Hash32, Timestamp, WardenError, WardenResult};

/// Protocol tag occupying the first word of the message
pub const RESET_OWNERS_TAG: &[u8] = b"warden.reset_owners.v1";

/// Encoded message length in bytes
pub const RESET_OWNERS_MESSAGE_LEN: usize = 32 * 4 + 8;

/// Signed authorization to install `new_owner_guid` on one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOwnersMessage {
    /// Chain the account lives on
    pub chain_id: ChainId,
    /// Account being reset
    pub account_address: ContractAddress,
    /// Owner the reset installs
    pub new_owner_guid: Guid,
    /// First timestamp at which the message is no longer accepted
    pub expiry: Timestamp,
}

impl ResetOwnersMessage {
    /// Bind a reset to a chain, an account and a new owner
    pub fn new(
        chain_id: ChainId,
        account_address: ContractAddress,
        new_owner_guid: Guid,
        expiry: Timestamp,
    ) -> Self {
        Self {
            chain_id,
            account_address,
            new_owner_guid,
            expiry,
        }
    }

    /// Byte-exact encoding
    pub fn encode(&self) -> [u8; RESET_OWNERS_MESSAGE_LEN] {
        let mut out = [0u8; RESET_OWNERS_MESSAGE_LEN];
        out[..RESET_OWNERS_TAG.len()].copy_from_slice(RESET_OWNERS_TAG);
        out[32..64].copy_from_slice(self.chain_id.as_felt().as_bytes());
        out[64..96].copy_from_slice(self.account_address.as_felt().as_bytes());
        out[96..128].copy_from_slice(self.new_owner_guid.as_bytes());
        out[128..].copy_from_slice(&self.expiry.to_be_bytes());
        out
    }

    /// Digest the owner, guardian and new owner sign
    pub fn hash(&self) -> Hash32 {
        Hash32::from_bytes(&self.encode())
    }

    /// Reject the message once `now` reaches its expiry
    pub fn ensure_not_expired(&self, now: Timestamp) -> WardenResult<()> {
        if now >= self.expiry {
            tracing::warn!(expiry = self.expiry, now, "reset owners message expired");
            return Err(WardenError::MessageExpired {
                expiry: self.expiry,
                now,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::Felt;

    fn message() -> ResetOwnersMessage {
        ResetOwnersMessage::new(
            ChainId::from_name("SN_SEPOLIA").unwrap(),
            ContractAddress::from(Felt::from(0x1234u64)),
            Guid::from(Felt([0x11u8; 32])),
            1_700_000_000,
        )
    }

    #[test]
    fn test_layout() {
        let bytes = message().encode();
        assert_eq!(bytes.len(), 136);
        assert_eq!(&bytes[..22], b"warden.reset_owners.v1");
        assert!(bytes[22..32].iter().all(|b| *b == 0));
        assert_eq!(&bytes[54..64], b"SN_SEPOLIA");
        assert_eq!(&bytes[94..96], &[0x12, 0x34]);
        assert_eq!(&bytes[96..128], &[0x11u8; 32]);
        assert_eq!(&bytes[128..], &1_700_000_000u64.to_be_bytes());
    }

    #[test]
    fn test_known_hash() {
        assert_eq!(
            message().hash().to_hex(),
            "3ee8a57150f4ae57fe30fd0395a98348d8f33fb20c45783d21b51a26135344e6"
        );
    }

    #[test]
    fn test_every_field_is_bound() {
        let base = message();
        let other_chain = ResetOwnersMessage {
            chain_id: ChainId::from_name("SN_MAIN").unwrap(),
            ..base
        };
        let other_account = ResetOwnersMessage {
            account_address: ContractAddress::from(Felt::from(0x1235u64)),
            ..base
        };
        let other_owner = ResetOwnersMessage {
            new_owner_guid: Guid::from(Felt([0x12u8; 32])),
            ..base
        };
        let other_expiry = ResetOwnersMessage {
            expiry: base.expiry + 1,
            ..base
        };
        for changed in [other_chain, other_account, other_owner, other_expiry] {
            assert_ne!(changed.hash(), base.hash());
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let message = message();
        assert!(message.ensure_not_expired(1_699_999_999).is_ok());
        assert_eq!(
            message.ensure_not_expired(1_700_000_000),
            Err(WardenError::MessageExpired {
                expiry: 1_700_000_000,
                now: 1_700_000_000,
            })
        );
    }
}
