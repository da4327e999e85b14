//! # Protocol Configuration & Constants
//!
//! Every fixed field of the raw transaction layout lives here, together with
//! the address version bytes for each supported network. The assembler and
//! signer never hardcode a byte value of their own.
//!
//! Runtime choices (network, public key format, nonce mode) are collected in
//! [`SignerConfig`], which the binary builds from its command-line arguments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Transaction Layout
// ---------------------------------------------------------------------------

/// Transaction format version. Serialized as 4 little-endian bytes.
pub const TX_VERSION: u32 = 1;

/// Number of inputs. Always one: a single P2PKH output is spent.
pub const INPUT_COUNT: u8 = 1;

/// Number of outputs. Always one: the P2SH destination. No change output.
pub const OUTPUT_COUNT: u8 = 1;

/// Index of the output being spent inside the referenced transaction.
pub const PREVIOUS_OUTPUT_INDEX: u32 = 0;

/// Input sequence number. 0xFFFFFFFF marks the input as final.
pub const SEQUENCE_FINAL: u32 = 0xFFFF_FFFF;

/// Transaction lock time. Zero means "valid immediately".
pub const LOCK_TIME: u32 = 0;

/// Length of a transaction id in bytes.
pub const TXID_LENGTH: usize = 32;

/// Largest value a single-byte length prefix can carry.
pub const MAX_PREFIXED_LENGTH: usize = u8::MAX as usize;

// ---------------------------------------------------------------------------
// Signature Hash
// ---------------------------------------------------------------------------

/// SIGHASH_ALL: the signature commits to every input and output.
pub const SIGHASH_ALL: u32 = 0x0000_0001;

/// The sighash type as it is appended to the signing preimage (4 bytes, LE).
pub const SIGHASH_ALL_MARKER: [u8; 4] = SIGHASH_ALL.to_le_bytes();

/// The sighash type as it trails the DER signature inside the ScriptSig.
pub const SIGHASH_ALL_BYTE: u8 = SIGHASH_ALL as u8;

// ---------------------------------------------------------------------------
// Key & Hash Sizes
// ---------------------------------------------------------------------------

/// Raw secp256k1 secret key length.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Trailing WIF byte signalling that the matching public key is compressed.
pub const WIF_COMPRESSION_FLAG: u8 = 0x01;

/// HASH160 output length: the payload of every P2PKH and P2SH address.
pub const HASH160_LENGTH: usize = 20;

/// Base58Check checksum length (first bytes of a double SHA-256).
pub const CHECKSUM_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// The network an address or key belongs to. Determines version bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Version byte of a P2PKH address (`1...` on mainnet).
    pub const fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// Version byte of a P2SH address (`3...` on mainnet).
    pub const fn p2sh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x05,
            Network::Testnet => 0xc4,
        }
    }

    /// Version byte of a WIF-encoded private key.
    pub const fn wif_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" | "regtest" => Ok(Network::Testnet),
            other => Err(format!("unknown network: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Signer Configuration
// ---------------------------------------------------------------------------

/// Serialization of the public key placed in the ScriptSig.
///
/// Must match the form whose HASH160 the spent P2PKH output commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicKeyFormat {
    /// 65 bytes, `04 || X || Y`.
    #[default]
    Uncompressed,
    /// 33 bytes, `02/03 || X`.
    Compressed,
}

/// How the ECDSA nonce is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonceMode {
    /// RFC 6979: the nonce is a function of the key and the message digest.
    #[default]
    Deterministic,
    /// RFC 6979 with 32 bytes of OS entropy mixed in per signature.
    Random,
}

impl FromStr for NonceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deterministic" | "rfc6979" => Ok(NonceMode::Deterministic),
            "random" => Ok(NonceMode::Random),
            other => Err(format!("unknown nonce mode: {other}")),
        }
    }
}

/// Runtime options for a signing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignerConfig {
    pub network: Network,
    pub public_key_format: PublicKeyFormat,
    pub nonce_mode: NonceMode,
}

impl SignerConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    pub fn with_public_key_format(mut self, format: PublicKeyFormat) -> Self {
        self.public_key_format = format;
        self
    }

    pub fn with_nonce_mode(mut self, mode: NonceMode) -> Self {
        self.nonce_mode = mode;
        self
    }
}
