//! # Hashing Utilities
//!
//! The three hash constructions the pipeline needs, and nothing else:
//!
//! - **SHA-256**, the building block.
//! - **Double SHA-256** (`SHA-256(SHA-256(data))`), used for the signature
//!   digest, transaction ids, and Base58Check checksums.
//! - **HASH160** (`RIPEMD-160(SHA-256(data))`), the 20-byte commitment that
//!   P2PKH and P2SH addresses carry.
//!
//! All functions return fixed-size arrays. Callers that need a `Vec<u8>`
//! can call `.to_vec()`; most don't.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::config::HASH160_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use p2sh_protocol::crypto::sha256;
///
/// let hash = sha256(b"hello");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the double-SHA-256 hash: `SHA-256(SHA-256(data))`.
///
/// This is the digest that gets signed. Never the raw transaction bytes,
/// never a single hash.
///
/// # Example
///
/// ```
/// use p2sh_protocol::crypto::{double_sha256, sha256};
///
/// let digest = double_sha256(b"raw transaction bytes");
/// assert_eq!(digest, sha256(&sha256(b"raw transaction bytes")));
/// ```
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute HASH160: `RIPEMD-160(SHA-256(data))`.
///
/// Applied to a serialized public key it yields the P2PKH commitment;
/// applied to a redeem script it yields the P2SH commitment.
pub fn hash160(data: &[u8]) -> [u8; HASH160_LENGTH] {
    let mut hasher = Ripemd160::new();
    hasher.update(sha256(data));
    let result = hasher.finalize();
    let mut output = [0u8; HASH160_LENGTH];
    output.copy_from_slice(&result);
    output
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_empty_input_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_abc_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn double_sha256_is_not_single_sha256() {
        let data = b"preimage";
        assert_ne!(double_sha256(data), sha256(data));
        assert_eq!(double_sha256(data), sha256(&sha256(data)));
    }

    #[test]
    fn hash160_of_generator_point() {
        // Uncompressed public key for secret key 1 (the curve generator G).
        let g = hex::decode(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
        .unwrap();
        assert_eq!(
            hex::encode(hash160(&g)),
            "91b24bf9f5288532960ac687abb035127b1d28a5"
        );
    }

    #[test]
    fn hash160_of_compressed_generator_point() {
        let g = hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
            .unwrap();
        assert_eq!(
            hex::encode(hash160(&g)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }
}
