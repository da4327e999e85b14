//! Byte-level helpers for the raw transaction layout: txid byte order,
//! single-byte length prefixes, and a bounds-checked reader.

use std::fmt;
use std::str::FromStr;

use crate::config::{MAX_PREFIXED_LENGTH, TXID_LENGTH};
use crate::error::{FundingError, Result};

// ---------------------------------------------------------------------------
// Txid
// ---------------------------------------------------------------------------

/// A transaction id in display order (the order block explorers and RPC
/// interfaces print). Inside a spending transaction the bytes are reversed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Txid([u8; TXID_LENGTH]);

impl Txid {
    pub fn from_display_bytes(bytes: [u8; TXID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Build from the little-endian order used on the wire.
    pub fn from_wire_bytes(bytes: [u8; TXID_LENGTH]) -> Self {
        Self(reverse_bytes(bytes))
    }

    /// Parse 64 hex characters. Fails with [`FundingError::MalformedInput`].
    pub fn from_hex(s: &str) -> Result<Self> {
        let decoded = hex::decode(s.trim())
            .map_err(|e| FundingError::MalformedInput(format!("{s:?}: {e}")))?;
        let bytes: [u8; TXID_LENGTH] = decoded.as_slice().try_into().map_err(|_| {
            FundingError::MalformedInput(format!(
                "expected {TXID_LENGTH} bytes, got {}",
                decoded.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn display_bytes(&self) -> &[u8; TXID_LENGTH] {
        &self.0
    }

    /// The reversed bytes that go into an input's outpoint.
    pub fn wire_bytes(&self) -> [u8; TXID_LENGTH] {
        reverse_bytes(self.0)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Txid {
    type Err = FundingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Txid({})", self.to_hex())
    }
}

/// Reverse a fixed-size byte array.
pub fn reverse_bytes<const N: usize>(mut bytes: [u8; N]) -> [u8; N] {
    bytes.reverse();
    bytes
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Append `data` preceded by its length as a single byte.
///
/// `field` names the data in the [`FundingError::LengthOverflow`] raised when
/// it is longer than 255 bytes.
pub fn write_length_prefixed(buf: &mut Vec<u8>, field: &'static str, data: &[u8]) -> Result<()> {
    let len = u8::try_from(data.len()).map_err(|_| FundingError::LengthOverflow {
        field,
        len: data.len(),
        max: MAX_PREFIXED_LENGTH,
    })?;
    buf.push(len);
    buf.extend_from_slice(data);
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Cursor over raw transaction bytes. Every read is bounds-checked and
/// reports the offset it failed at.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn error(&self, reason: impl Into<String>) -> FundingError {
        FundingError::Parse {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    pub fn read_slice(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.error(format!(
                "{what}: need {len} bytes, {} left",
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N, what)?);
        Ok(out)
    }

    pub fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.read_array::<1>(what)?[0])
    }

    pub fn read_u32_le(&mut self, what: &str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array(what)?))
    }

    pub fn read_u64_le(&mut self, what: &str) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array(what)?))
    }

    /// Read a single-byte length followed by that many bytes.
    pub fn read_length_prefixed(&mut self, what: &str) -> Result<&'a [u8]> {
        let len = self.read_u8(what)? as usize;
        self.read_slice(len, what)
    }
}
