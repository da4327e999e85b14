//! Transaction signing: the transition from unsigned to signed.
//!
//! Signing is a separate step from building because the key is only needed
//! here. The procedure:
//!
//! 1. Derive the public key from the private key.
//! 2. Double-SHA-256 the signing preimage (unsigned bytes + sighash marker).
//! 3. Sign the digest.
//! 4. Verify the signature against the digest and the derived key. A
//!    failure here aborts; nothing is reassembled.
//! 5. Package `<sig || 0x01> <pubkey>` as the ScriptSig and reassemble.
//!
//! The curve context lives exactly as long as [`UnsignedTransaction::sign`]
//! runs and is released on every return path.

use crate::address::Address;
use crate::config::{PublicKeyFormat, SignerConfig};
use crate::crypto::context::{CurveBackend, CurveContext};
use crate::crypto::hash::double_sha256;
use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::crypto::nonce::{derive_nonce, NonceData};
use crate::error::{FundingError, Result};
use crate::script::{p2pkh_locking_script, p2pkh_unlocking_script, Script};

use super::assembler::{assemble, InputDescriptor, OutputDescriptor};
use super::builder::{SignedTransaction, UnsignedTransaction};
use super::bytes::Txid;

/// Public key format actually used for `key`.
///
/// A WIF string carrying the compression flag commits to the compressed
/// key, whatever the configured default.
pub fn effective_public_key_format(key: &PrivateKey, config: &SignerConfig) -> PublicKeyFormat {
    if key.is_compressed() {
        PublicKeyFormat::Compressed
    } else {
        config.public_key_format
    }
}

/// Decode a WIF key for the configured network.
pub fn decode_private_key(wif: &str, config: &SignerConfig) -> Result<PrivateKey> {
    PrivateKey::from_wif(wif, config.network).map_err(FundingError::KeyDecode)
}

/// The P2PKH address a WIF key spends from.
pub fn derive_p2pkh_address(wif: &str, config: &SignerConfig) -> Result<Address> {
    let key = decode_private_key(wif, config)?;
    let ctx = CurveContext::start();
    let public_key = ctx.derive_public_key(&key, effective_public_key_format(&key, config))?;
    Ok(public_key.p2pkh_address(config.network))
}

/// Sign a preimage and package the resulting ScriptSig.
///
/// Returns the ScriptSig together with the public key it carries.
pub fn sign_preimage<B: CurveBackend>(
    backend: &B,
    preimage: &[u8],
    key: &PrivateKey,
    format: PublicKeyFormat,
    nonce: NonceData,
) -> Result<(Script, PublicKey)> {
    let public_key = backend.derive_public_key(key, format)?;

    let digest = double_sha256(preimage);
    let signature = backend.sign(&digest, key, nonce)?;

    if !backend.verify(&digest, &signature, &public_key) {
        return Err(FundingError::Signing(
            "signature did not verify against the derived public key".to_string(),
        ));
    }

    let script_sig = p2pkh_unlocking_script(&signature, public_key.as_bytes())?;
    Ok((script_sig, public_key))
}

impl UnsignedTransaction {
    /// Sign with a WIF-encoded private key.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use p2sh_protocol::address::Address;
    /// use p2sh_protocol::config::{Network, SignerConfig};
    /// use p2sh_protocol::transaction::UnsignedTransaction;
    ///
    /// let config = SignerConfig::new(Network::Mainnet);
    /// let source = Address::decode_p2pkh("1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm", config.network)?;
    /// let destination = Address::p2sh(config.network, [0x22; 20]);
    /// let tx = UnsignedTransaction::p2pkh_to_p2sh(
    ///     "81b4c832d70cb56ff957589752eb4125a4cab78a25a8fc52d6a09e5bd4404d48",
    ///     &source,
    ///     &destination,
    ///     100_000,
    /// )?;
    /// let signed = tx.sign("5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf", &config)?;
    /// println!("{}", signed.to_hex());
    /// # Ok::<(), p2sh_protocol::FundingError>(())
    /// ```
    pub fn sign(self, wif: &str, config: &SignerConfig) -> Result<SignedTransaction> {
        let key = decode_private_key(wif, config)?;
        let ctx = CurveContext::start();
        self.sign_with(&ctx, &key, config)
    }

    /// Sign using an explicit curve backend.
    pub fn sign_with<B: CurveBackend>(
        self,
        backend: &B,
        key: &PrivateKey,
        config: &SignerConfig,
    ) -> Result<SignedTransaction> {
        let preimage = self.signing_preimage()?;
        tracing::debug!(
            txid = %self.txid(),
            preimage_len = preimage.len(),
            "unsigned transaction assembled"
        );

        let format = effective_public_key_format(key, config);
        let nonce = derive_nonce(config.nonce_mode);
        let (script_sig, public_key) = sign_preimage(backend, &preimage, key, format, nonce)?;

        if p2pkh_locking_script(&public_key.pubkey_hash()) != *self.previous_locking_script() {
            tracing::warn!(
                address = %public_key.p2pkh_address(config.network),
                "private key does not match the output being spent; the network will reject this transaction"
            );
        }

        let signed = self.finalize(script_sig)?;
        tracing::info!(
            txid = %signed.txid(),
            size = signed.len(),
            "transaction signed"
        );
        Ok(signed)
    }
}

/// Sign a prepared preimage and assemble the final transaction from loose
/// arguments.
///
/// `preimage` must already carry the sighash marker. The final transaction
/// spends output 0 of `input_txid_hex` and pays `amount` to `paying_script`.
pub fn sign_raw_transaction(
    preimage: &[u8],
    wif: &str,
    paying_script: &[u8],
    input_txid_hex: &str,
    amount: u64,
    config: &SignerConfig,
) -> Result<Vec<u8>> {
    let txid = Txid::from_hex(input_txid_hex)?;
    let key = decode_private_key(wif, config)?;

    let (script_sig, _) = {
        let ctx = CurveContext::start();
        let format = effective_public_key_format(&key, config);
        sign_preimage(&ctx, preimage, &key, format, derive_nonce(config.nonce_mode))?
    };

    assemble(
        &InputDescriptor::new(txid, script_sig),
        &OutputDescriptor::new(amount, Script::from_bytes(paying_script)),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
