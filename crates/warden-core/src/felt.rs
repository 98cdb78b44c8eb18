//! Wire word used for calldata, return data and hashed fields.
//!
//! A `Felt` is 32 big-endian bytes. Chain ids, contract addresses, public keys
//! and GUIDs all travel as felts so a single codec covers every parameter.

use crate::errors::{WardenError, WardenResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte big-endian word
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Felt(pub [u8; 32]);

impl Felt {
    /// The zero word
    pub const ZERO: Felt = Felt([0u8; 32]);

    /// The word with value one
    pub const ONE: Felt = Felt::from_u64(1);

    /// Create from a `u64` value
    pub const fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Create from raw big-endian bytes
    pub const fn from_bytes_be(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw big-endian bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy of the raw big-endian bytes
    pub fn to_bytes_be(self) -> [u8; 32] {
        self.0
    }

    /// Whether every byte is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Value as `u64`, if it fits
    pub fn to_u64(&self) -> Option<u64> {
        if self.0[..24].iter().any(|b| *b != 0) {
            return None;
        }
        let mut be = [0u8; 8];
        be.copy_from_slice(&self.0[24..]);
        Some(u64::from_be_bytes(be))
    }

    /// Parse a hex string, with or without `0x`, of at most 64 digits
    pub fn from_hex(input: &str) -> WardenResult<Self> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.is_empty() || digits.len() > 64 {
            return Err(WardenError::invalid(format!("invalid felt hex: {input}")));
        }
        let padded = format!("{digits:0>64}");
        let decoded = hex::decode(padded)
            .map_err(|e| WardenError::invalid(format!("invalid felt hex {input}: {e}")))?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Encode a short ASCII string (at most 31 bytes), right-aligned
    ///
    /// This is how chain ids such as `SN_SEPOLIA` are represented.
    pub fn from_short_string(value: &str) -> WardenResult<Self> {
        if !value.is_ascii() || value.len() > 31 {
            return Err(WardenError::invalid(format!(
                "short string must be ASCII and at most 31 bytes: {value}"
            )));
        }
        let mut bytes = [0u8; 32];
        bytes[32 - value.len()..].copy_from_slice(value.as_bytes());
        Ok(Self(bytes))
    }

    /// Lowercase hex with `0x` prefix and no leading zeros
    pub fn to_hex(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<bool> for Felt {
    fn from(value: bool) -> Self {
        if value {
            Felt::ONE
        } else {
            Felt::ZERO
        }
    }
}

impl From<[u8; 32]> for Felt {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Felt({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_round_trip() {
        let felt = Felt::from(1_000u64);
        assert_eq!(felt.to_u64(), Some(1_000));
        assert_eq!(felt.to_hex(), "0x3e8");
    }

    #[test]
    fn test_large_value_does_not_fit_u64() {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        assert_eq!(Felt(bytes).to_u64(), None);
    }

    #[test]
    fn test_zero_display() {
        assert_eq!(Felt::ZERO.to_string(), "0x0");
        assert!(Felt::ZERO.is_zero());
        assert!(!Felt::ONE.is_zero());
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Felt::from_hex("0x0d").unwrap(), Felt::from(13u64));
        assert_eq!(Felt::from_hex("ff").unwrap(), Felt::from(255u64));
        assert!(Felt::from_hex("0x").is_err());
        assert!(Felt::from_hex("0xzz").is_err());
        assert!(Felt::from_hex(&"1".repeat(65)).is_err());
    }

    #[test]
    fn test_short_string() {
        let chain = Felt::from_short_string("SN_SEPOLIA").unwrap();
        assert_eq!(chain.to_hex(), "0x534e5f5345504f4c4941");
        assert!(Felt::from_short_string(&"x".repeat(32)).is_err());
    }

    #[test]
    fn test_bad_input_is_invalid_error() {
        use assert_matches::assert_matches;
        assert_matches!(Felt::from_hex("0xg1"), Err(WardenError::Invalid { .. }));
        assert_matches!(
            Felt::from_short_string("caf\u{e9}"),
            Err(WardenError::Invalid { .. })
        );
    }
}
