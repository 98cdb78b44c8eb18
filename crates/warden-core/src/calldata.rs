//! Calldata codec
//!
//! Entry point parameters and return values are flat sequences of `Felt`
//! words. Layouts:
//!
//! - `Signer`: `[signer_type_tag, public_key]`
//! - `SignerSignature`: `[signer_type_tag, public_key, sig_word…]`, the number
//!   of signature words being fixed by the signer type
//! - `Option<T>`: `[0, T…]` for `Some`, `[1]` for `None`
//! - `Vec<T>`: `[len, T…]`
//! - `u64`: one word whose value fits in 64 bits
//! - `bool`: `[0]` or `[1]`
//!
//! Zero public keys are rejected while decoding, so a zero signer surfaces
//! as the same "param #N" failure as any other malformed parameter.

use crate::errors::{WardenError, WardenResult};
use crate::felt::Felt;
use crate::types::{Guid, Signer, SignerSignature, SignerType};

/// Reason a single parameter failed to decode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Input ended before the value was complete
    #[error("calldata truncated")]
    Truncated,
    /// Signer type tag is not known
    #[error("unknown signer type tag {0}")]
    UnknownSignerType(u64),
    /// Signer public key is zero
    #[error("zero signer")]
    ZeroSigner,
    /// Enum variant tag out of range
    #[error("invalid variant tag {0}")]
    InvalidVariant(String),
    /// Integer does not fit the target type
    #[error("integer out of range")]
    OutOfRange,
}

/// Positional cursor over calldata words
#[derive(Debug)]
pub struct Cursor<'a> {
    words: &'a [Felt],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Start reading at the first word
    pub fn new(words: &'a [Felt]) -> Self {
        Self { words, position: 0 }
    }

    /// Take the next word
    pub fn next_word(&mut self) -> Result<Felt, DecodeError> {
        let word = self
            .words
            .get(self.position)
            .copied()
            .ok_or(DecodeError::Truncated)?;
        self.position += 1;
        Ok(word)
    }

    /// Take the next word as a `u64`
    pub fn next_u64(&mut self) -> Result<u64, DecodeError> {
        self.next_word()?.to_u64().ok_or(DecodeError::OutOfRange)
    }

    /// Words not yet consumed
    pub fn remaining(&self) -> usize {
        self.words.len() - self.position
    }
}

/// Types that can be read from calldata
pub trait Decode: Sized {
    /// Decode one value, advancing the cursor
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError>;
}

/// Types that can be written as calldata
pub trait Encode {
    /// Append this value's words
    fn encode(&self, out: &mut Vec<Felt>);

    /// Encode into a fresh buffer
    fn to_calldata(&self) -> Vec<Felt> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }
}

impl Decode for Felt {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        cursor.next_word()
    }
}

impl Encode for Felt {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(*self);
    }
}

impl Decode for u64 {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        cursor.next_u64()
    }
}

impl Encode for u64 {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(*self));
    }
}

impl Decode for bool {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        match cursor.next_u64()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidVariant(other.to_string())),
        }
    }
}

impl Encode for bool {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(*self));
    }
}

impl Decode for Guid {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        cursor.next_word().map(Guid::from)
    }
}

impl Encode for Guid {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(*self));
    }
}

impl Decode for SignerType {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let word = cursor.next_word()?;
        let tag = word
            .to_u64()
            .ok_or_else(|| DecodeError::InvalidVariant(word.to_hex()))?;
        SignerType::from_wire_tag(tag).ok_or(DecodeError::UnknownSignerType(tag))
    }
}

impl Encode for SignerType {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(self.wire_tag()));
    }
}

impl Decode for Signer {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let signer_type = SignerType::decode(cursor)?;
        let public_key = cursor.next_word()?;
        if public_key.is_zero() {
            return Err(DecodeError::ZeroSigner);
        }
        Ok(Signer::new(signer_type, public_key))
    }
}

impl Encode for Signer {
    fn encode(&self, out: &mut Vec<Felt>) {
        self.signer_type.encode(out);
        out.push(self.public_key);
    }
}

impl Decode for SignerSignature {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let signer = Signer::decode(cursor)?;
        let words = signer.signer_type.signature_words();
        let mut signature = Vec::with_capacity(words * 32);
        for _ in 0..words {
            signature.extend_from_slice(cursor.next_word()?.as_bytes());
        }
        Ok(SignerSignature { signer, signature })
    }
}

impl Encode for SignerSignature {
    fn encode(&self, out: &mut Vec<Felt>) {
        self.signer.encode(out);
        let words = self.signer.signer_type.signature_words();
        for index in 0..words {
            let mut word = [0u8; 32];
            let start = (index * 32).min(self.signature.len());
            let end = ((index + 1) * 32).min(self.signature.len());
            word[..end - start].copy_from_slice(&self.signature[start..end]);
            out.push(Felt(word));
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        match cursor.next_u64()? {
            0 => T::decode(cursor).map(Some),
            1 => Ok(None),
            other => Err(DecodeError::InvalidVariant(other.to_string())),
        }
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, out: &mut Vec<Felt>) {
        match self {
            Some(value) => {
                out.push(Felt::ZERO);
                value.encode(out);
            }
            None => out.push(Felt::ONE),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        let len = cursor.next_u64()?;
        // Every element takes at least one word.
        if len > cursor.remaining() as u64 {
            return Err(DecodeError::Truncated);
        }
        (0..len).map(|_| T::decode(cursor)).collect()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(self.len() as u64));
        for item in self {
            item.encode(out);
        }
    }
}

/// Reads the numbered parameters of one entry point call
///
/// Any decode failure is reported as `Failed to deserialize param #N`, where
/// `N` is the 1-based position of the parameter being read.
#[derive(Debug)]
pub struct ParamReader<'a> {
    cursor: Cursor<'a>,
    param: usize,
}

impl<'a> ParamReader<'a> {
    /// Start reading parameters
    pub fn new(calldata: &'a [Felt]) -> Self {
        Self {
            cursor: Cursor::new(calldata),
            param: 0,
        }
    }

    /// Decode the next parameter
    pub fn param<T: Decode>(&mut self) -> WardenResult<T> {
        self.param += 1;
        T::decode(&mut self.cursor).map_err(|err| {
            tracing::debug!(param = self.param, error = %err, "calldata rejected");
            WardenError::deserialize(self.param)
        })
    }

    /// Require that every word was consumed
    pub fn finish(self) -> WardenResult<()> {
        if self.cursor.remaining() > 0 {
            return Err(WardenError::deserialize(self.param + 1));
        }
        Ok(())
    }
}
