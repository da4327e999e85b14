//! # Base58Check Addresses
//!
//! Human-readable addresses and WIF keys are `version || payload ||
//! checksum`, Base58-encoded with Bitcoin's alphabet. The checksum is the
//! first four bytes of the double SHA-256 of `version || payload`.
//!
//! The pipeline only ever needs two address kinds:
//!
//! - **P2PKH**, the output being spent (`HASH160(pubkey)` payload).
//! - **P2SH**, the destination (`HASH160(redeem_script)` payload).
//!
//! Decoding checks the checksum, the version byte against the configured
//! [`Network`], and the 20-byte payload length. Nothing downstream
//! re-validates an [`Address`].

use std::fmt;

use thiserror::Error;

use crate::config::{Network, CHECKSUM_LENGTH, HASH160_LENGTH};
use crate::crypto::hash::{double_sha256, hash160};
use crate::script::{self, Script};

/// Errors from Base58Check decoding and address validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("decoded data is {0} bytes, too short for version and checksum")]
    TooShort(usize),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("unexpected version byte 0x{got:02x} (expected {expected})")]
    UnexpectedVersion {
        /// Human-readable description of the accepted version(s).
        expected: String,
        /// The version byte actually found.
        got: u8,
    },

    #[error("invalid payload length: expected {expected} bytes, got {got}")]
    InvalidPayloadLength { expected: usize, got: usize },
}

// ---------------------------------------------------------------------------
// Base58Check
// ---------------------------------------------------------------------------

/// Encode `version || payload` with a trailing 4-byte checksum.
pub fn check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LENGTH);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode a Base58Check string into its version byte and payload.
///
/// Fails on invalid characters, a missing version byte, or a checksum that
/// does not match.
pub fn check_decode(encoded: &str) -> Result<(u8, Vec<u8>), AddressError> {
    let decoded = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;

    if decoded.len() < 1 + CHECKSUM_LENGTH {
        return Err(AddressError::TooShort(decoded.len()));
    }

    let (body, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LENGTH);
    if checksum != &double_sha256(body)[..CHECKSUM_LENGTH] {
        return Err(AddressError::ChecksumMismatch);
    }

    Ok((body[0], body[1..].to_vec()))
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// The locking template an address commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    P2pkh,
    P2sh,
}

impl AddressKind {
    fn version(self, network: Network) -> u8 {
        match self {
            AddressKind::P2pkh => network.p2pkh_version(),
            AddressKind::P2sh => network.p2sh_version(),
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::P2pkh => write!(f, "P2PKH"),
            AddressKind::P2sh => write!(f, "P2SH"),
        }
    }
}

/// A decoded P2PKH or P2SH address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    kind: AddressKind,
    hash: [u8; HASH160_LENGTH],
}

impl Address {
    /// P2PKH address for a public key hash.
    pub fn p2pkh(network: Network, pubkey_hash: [u8; HASH160_LENGTH]) -> Self {
        Self {
            network,
            kind: AddressKind::P2pkh,
            hash: pubkey_hash,
        }
    }

    /// P2SH address for a script hash.
    pub fn p2sh(network: Network, script_hash: [u8; HASH160_LENGTH]) -> Self {
        Self {
            network,
            kind: AddressKind::P2sh,
            hash: script_hash,
        }
    }

    /// P2PKH address of a serialized (compressed or uncompressed) public key.
    pub fn from_public_key(network: Network, public_key: &[u8]) -> Self {
        Self::p2pkh(network, hash160(public_key))
    }

    /// P2SH address of a redeem script.
    pub fn from_redeem_script(network: Network, redeem_script: &[u8]) -> Self {
        Self::p2sh(network, hash160(redeem_script))
    }

    /// Decode an address of the given kind on the given network.
    pub fn decode(encoded: &str, network: Network, kind: AddressKind) -> Result<Self, AddressError> {
        let (version, payload) = check_decode(encoded)?;

        let expected = kind.version(network);
        if version != expected {
            return Err(AddressError::UnexpectedVersion {
                expected: format!("0x{expected:02x} for {network} {kind}"),
                got: version,
            });
        }

        let hash: [u8; HASH160_LENGTH] =
            payload
                .as_slice()
                .try_into()
                .map_err(|_| AddressError::InvalidPayloadLength {
                    expected: HASH160_LENGTH,
                    got: payload.len(),
                })?;

        Ok(Self {
            network,
            kind,
            hash,
        })
    }

    /// Decode a P2PKH address (the output being spent).
    pub fn decode_p2pkh(encoded: &str, network: Network) -> Result<Self, AddressError> {
        Self::decode(encoded, network, AddressKind::P2pkh)
    }

    /// Decode a P2SH address (the destination).
    pub fn decode_p2sh(encoded: &str, network: Network) -> Result<Self, AddressError> {
        Self::decode(encoded, network, AddressKind::P2sh)
    }

    /// Base58Check string form.
    pub fn encode(&self) -> String {
        check_encode(self.kind.version(self.network), &self.hash)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// The 20-byte HASH160 commitment.
    pub fn hash(&self) -> &[u8; HASH160_LENGTH] {
        &self.hash
    }

    /// The locking script an output paying to this address carries.
    pub fn locking_script(&self) -> Script {
        match self.kind {
            AddressKind::P2pkh => script::p2pkh_locking_script(&self.hash),
            AddressKind::P2sh => script::p2sh_locking_script_from_hash(&self.hash),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // P2PKH address of the uncompressed public key for secret key 1.
    const GENERATOR_ADDRESS: &str = "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm";
    const GENERATOR_HASH: &str = "91b24bf9f5288532960ac687abb035127b1d28a5";

    #[test]
    fn decode_known_p2pkh_address() {
        let addr = Address::decode_p2pkh(GENERATOR_ADDRESS, Network::Mainnet).unwrap();
        assert_eq!(hex::encode(addr.hash()), GENERATOR_HASH);
        assert_eq!(addr.kind(), AddressKind::P2pkh);
        assert_eq!(addr.encode(), GENERATOR_ADDRESS);
    }

    #[test]
    fn p2sh_mainnet_addresses_start_with_3() {
        let addr = Address::p2sh(Network::Mainnet, [0xab; 20]);
        let encoded = addr.encode();
        assert!(encoded.starts_with('3'), "got {encoded}");

        let decoded = Address::decode_p2sh(&encoded, Network::Mainnet).unwrap();
        assert_eq!(decoded, addr);
    }

    #[test]
    fn testnet_p2sh_addresses_start_with_2() {
        let encoded = Address::p2sh(Network::Testnet, [0x01; 20]).encode();
        assert!(encoded.starts_with('2'), "got {encoded}");
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        // Swap the last character for a different valid base58 digit.
        let mut chars: Vec<char> = GENERATOR_ADDRESS.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'z' { 'y' } else { 'z' };
        let corrupted: String = chars.into_iter().collect();

        assert_eq!(
            Address::decode_p2pkh(&corrupted, Network::Mainnet),
            Err(AddressError::ChecksumMismatch)
        );
    }

    #[test]
    fn invalid_base58_characters_are_rejected() {
        // '0', 'O', 'I' and 'l' are not in the alphabet.
        let err = check_decode("0OIl").unwrap_err();
        assert!(matches!(err, AddressError::InvalidBase58(_)));
    }

    #[test]
    fn p2pkh_address_is_not_accepted_as_destination() {
        let err = Address::decode_p2sh(GENERATOR_ADDRESS, Network::Mainnet).unwrap_err();
        assert!(matches!(
            err,
            AddressError::UnexpectedVersion { got: 0x00, .. }
        ));
    }

    #[test]
    fn wrong_network_is_rejected() {
        let err = Address::decode_p2pkh(GENERATOR_ADDRESS, Network::Testnet).unwrap_err();
        assert!(matches!(err, AddressError::UnexpectedVersion { .. }));
    }

    #[test]
    fn wrong_payload_length_is_rejected() {
        let encoded = check_encode(Network::Mainnet.p2sh_version(), &[0u8; 19]);
        assert_eq!(
            Address::decode_p2sh(&encoded, Network::Mainnet),
            Err(AddressError::InvalidPayloadLength {
                expected: 20,
                got: 19
            })
        );
    }

    #[test]
    fn too_short_input_is_rejected() {
        let encoded = bs58::encode([0x00, 0x01, 0x02]).into_string();
        assert_eq!(check_decode(&encoded), Err(AddressError::TooShort(3)));
    }

    #[test]
    fn check_encode_decode_preserves_version_and_payload() {
        let payload = [7u8; 33];
        let (version, decoded) = check_decode(&check_encode(0xef, &payload)).unwrap();
        assert_eq!(version, 0xef);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn from_public_key_matches_known_address() {
        let g = hex::decode(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
        .unwrap();
        assert_eq!(
            Address::from_public_key(Network::Mainnet, &g).encode(),
            GENERATOR_ADDRESS
        );
    }

    #[test]
    fn locking_script_follows_address_kind() {
        let p2pkh = Address::p2pkh(Network::Mainnet, [0x11; 20]).locking_script();
        assert_eq!(p2pkh.len(), 25);
        let p2sh = Address::p2sh(Network::Mainnet, [0x11; 20]).locking_script();
        assert_eq!(p2sh.len(), 23);
    }
}
