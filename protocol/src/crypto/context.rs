//! # Curve Context
//!
//! The secp256k1 context is a scoped resource: [`CurveContext::start`]
//! allocates it, and dropping the handle releases it. Every exit path out of
//! a signing run, including an early `?`, drops the handle, so there is no
//! separate teardown call to forget.
//!
//! The signer talks to the curve only through [`CurveBackend`]. Tests use
//! that seam to substitute a backend that misbehaves on purpose.

use secp256k1::ecdsa::Signature;
use secp256k1::{All, Message, PublicKey as SecpPublicKey, Secp256k1, SecretKey};

use super::keys::{PrivateKey, PublicKey};
use super::nonce::NonceData;
use crate::config::PublicKeyFormat;
use crate::error::{FundingError, Result};

/// The three curve operations the signer needs.
pub trait CurveBackend {
    /// Derive the serialized public key for `key`.
    fn derive_public_key(&self, key: &PrivateKey, format: PublicKeyFormat) -> Result<PublicKey>;

    /// Sign a 32-byte digest, returning the DER-encoded signature.
    fn sign(&self, digest: &[u8; 32], key: &PrivateKey, nonce: NonceData) -> Result<Vec<u8>>;

    /// Check a DER signature over `digest` against `public_key`.
    fn verify(&self, digest: &[u8; 32], der_signature: &[u8], public_key: &PublicKey) -> bool;
}

/// Handle to an initialized secp256k1 context.
pub struct CurveContext {
    secp: Secp256k1<All>,
}

impl CurveContext {
    /// Allocate a signing + verification context.
    pub fn start() -> Self {
        tracing::trace!("secp256k1 context started");
        Self {
            secp: Secp256k1::new(),
        }
    }

    fn secret_key(key: &PrivateKey) -> Result<SecretKey> {
        SecretKey::from_slice(key.secret_bytes())
            .map_err(|e| FundingError::KeyDerivation(e.to_string()))
    }
}

impl Drop for CurveContext {
    fn drop(&mut self) {
        tracing::trace!("secp256k1 context released");
    }
}

impl CurveBackend for CurveContext {
    fn derive_public_key(&self, key: &PrivateKey, format: PublicKeyFormat) -> Result<PublicKey> {
        let secret = Self::secret_key(key)?;
        let public = SecpPublicKey::from_secret_key(&self.secp, &secret);
        let bytes = match format {
            PublicKeyFormat::Uncompressed => public.serialize_uncompressed().to_vec(),
            PublicKeyFormat::Compressed => public.serialize().to_vec(),
        };
        Ok(PublicKey::from_bytes(bytes))
    }

    fn sign(&self, digest: &[u8; 32], key: &PrivateKey, nonce: NonceData) -> Result<Vec<u8>> {
        let secret = Self::secret_key(key).map_err(|e| FundingError::Signing(e.to_string()))?;
        let message = Message::from_digest(*digest);
        let signature = match nonce {
            NonceData::Deterministic => self.secp.sign_ecdsa(&message, &secret),
            NonceData::Entropy(extra) => {
                self.secp.sign_ecdsa_with_noncedata(&message, &secret, &extra)
            }
        };
        Ok(signature.serialize_der().to_vec())
    }

    fn verify(&self, digest: &[u8; 32], der_signature: &[u8], public_key: &PublicKey) -> bool {
        let Ok(signature) = Signature::from_der(der_signature) else {
            return false;
        };
        let Ok(public) = SecpPublicKey::from_slice(public_key.as_bytes()) else {
            return false;
        };
        let message = Message::from_digest(*digest);
        self.secp.verify_ecdsa(&message, &signature, &public).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
