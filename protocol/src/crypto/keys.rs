//! # Key Management
//!
//! WIF private keys and serialized secp256k1 public keys.
//!
//! A [`PrivateKey`] here is just validated key *material*: 32 bytes that came
//! out of a well-formed WIF string. Whether those bytes are a valid scalar on
//! the curve is the curve context's call (see [`super::context`]), which is
//! where key derivation can fail.
//!
//! Key bytes are never logged and never appear in `Debug` output.

use std::fmt;

use thiserror::Error;

use crate::address::{self, Address, AddressError};
use crate::config::{Network, PRIVATE_KEY_LENGTH, WIF_COMPRESSION_FLAG};
use crate::crypto::hash::hash160;

/// Errors that can occur while decoding a private key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid WIF encoding: {0}")]
    Encoding(#[from] AddressError),

    #[error("unexpected WIF version byte 0x{got:02x} (expected 0x{expected:02x})")]
    UnexpectedVersion { expected: u8, got: u8 },

    #[error("invalid key length: expected 32 bytes (or 33 with compression flag), got {0}")]
    InvalidLength(usize),
}

/// Raw 32-byte secp256k1 secret key material.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_LENGTH],
    compressed: bool,
}

impl PrivateKey {
    /// Wrap raw secret key bytes. Marks the key as uncompressed.
    pub fn from_bytes(bytes: [u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self {
            bytes,
            compressed: false,
        }
    }

    /// Decode a WIF-encoded private key for the given network.
    ///
    /// The payload must be exactly 32 bytes, or 33 bytes ending in the
    /// `0x01` compression flag. Anything else is rejected rather than
    /// truncated.
    pub fn from_wif(wif: &str, network: Network) -> Result<Self, KeyError> {
        let (version, payload) = address::check_decode(wif)?;

        if version != network.wif_version() {
            return Err(KeyError::UnexpectedVersion {
                expected: network.wif_version(),
                got: version,
            });
        }

        let compressed = match payload.len() {
            PRIVATE_KEY_LENGTH => false,
            len if len == PRIVATE_KEY_LENGTH + 1
                && payload[PRIVATE_KEY_LENGTH] == WIF_COMPRESSION_FLAG =>
            {
                true
            }
            len => return Err(KeyError::InvalidLength(len)),
        };

        let mut bytes = [0u8; PRIVATE_KEY_LENGTH];
        bytes.copy_from_slice(&payload[..PRIVATE_KEY_LENGTH]);
        Ok(Self { bytes, compressed })
    }

    /// Encode as WIF, keeping the compression flag this key was decoded with.
    pub fn to_wif(&self, network: Network) -> String {
        let mut payload = self.bytes.to_vec();
        if self.compressed {
            payload.push(WIF_COMPRESSION_FLAG);
        }
        address::check_encode(network.wif_version(), &payload)
    }

    /// Whether the WIF string carried the compression flag.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The raw secret bytes. Handle with care.
    pub fn secret_bytes(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        &self.bytes
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("compressed", &self.compressed)
            .finish_non_exhaustive()
    }
}

/// A serialized secp256k1 public key, as it appears in the ScriptSig.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `HASH160` of the serialized key: the P2PKH commitment.
    pub fn pubkey_hash(&self) -> [u8; 20] {
        hash160(&self.bytes)
    }

    /// The P2PKH address this key spends from.
    pub fn p2pkh_address(&self, network: Network) -> Address {
        Address::from_public_key(network, &self.bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
