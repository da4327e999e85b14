//! ECDSA nonce selection.
//!
//! ECDSA leaks the private key if the same nonce ever signs two different
//! digests. Both modes here derive the nonce with RFC 6979 from the key and
//! the digest, so a fresh nonce per message is guaranteed. `Random` mixes 32
//! bytes of OS entropy into the derivation on top of that.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::config::NonceMode;

/// Extra input to the nonce derivation for one signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum NonceData {
    /// Plain RFC 6979.
    Deterministic,
    /// RFC 6979 with additional entropy.
    Entropy([u8; 32]),
}

impl std::fmt::Debug for NonceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonceData::Deterministic => write!(f, "Deterministic"),
            NonceData::Entropy(_) => write!(f, "Entropy(..)"),
        }
    }
}

/// Produce the nonce input for one signature. Call once per signature.
pub fn derive_nonce(mode: NonceMode) -> NonceData {
    match mode {
        NonceMode::Deterministic => NonceData::Deterministic,
        NonceMode::Random => {
            let mut entropy = [0u8; 32];
            OsRng.fill_bytes(&mut entropy);
            NonceData::Entropy(entropy)
        }
    }
}
