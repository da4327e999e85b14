//! The two stages of a funding transaction.
//!
//! An [`UnsignedTransaction`] holds everything known before signing: the
//! outpoint, the locking script of the output being spent, and the
//! destination output. Its [`signing_preimage`](UnsignedTransaction::signing_preimage)
//! is the assembled transaction with the spent output's locking script
//! standing in for the ScriptSig, followed by the 4-byte sighash marker.
//!
//! A [`SignedTransaction`] can only be produced by finalizing an unsigned one
//! with a verified ScriptSig (see [`super::signing`]). There is no way back.

use crate::address::{Address, AddressKind};
use crate::config::SIGHASH_ALL_MARKER;
use crate::crypto::hash::double_sha256;
use crate::error::{FundingError, Result};
use crate::script::{p2sh_locking_script, Script};

use super::assembler::{assemble, InputDescriptor, OutputDescriptor};
use super::bytes::{reverse_bytes, Txid};

// ---------------------------------------------------------------------------
// UnsignedTransaction
// ---------------------------------------------------------------------------

/// A funding transaction before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    txid: Txid,
    previous_locking_script: Script,
    output: OutputDescriptor,
}

impl UnsignedTransaction {
    /// Spend output 0 of `txid`, locked by `previous_locking_script`, into `output`.
    pub fn new(txid: Txid, previous_locking_script: Script, output: OutputDescriptor) -> Self {
        Self {
            txid,
            previous_locking_script,
            output,
        }
    }

    /// Spend a P2PKH output into a P2SH destination.
    ///
    /// `source` must be a P2PKH address and `destination` a P2SH address;
    /// anything else is a [`FundingError::ScriptBuild`].
    pub fn p2pkh_to_p2sh(
        txid_hex: &str,
        source: &Address,
        destination: &Address,
        amount: u64,
    ) -> Result<Self> {
        let txid = Txid::from_hex(txid_hex)?;

        if source.kind() != AddressKind::P2pkh {
            return Err(FundingError::ScriptBuild(format!(
                "source {source} is a {} address, expected P2PKH",
                source.kind()
            )));
        }
        if destination.kind() != AddressKind::P2sh {
            return Err(FundingError::ScriptBuild(format!(
                "destination {destination} is a {} address, expected P2SH",
                destination.kind()
            )));
        }

        let script_pubkey = p2sh_locking_script(destination.hash())?;

        Ok(Self::new(
            txid,
            source.locking_script(),
            OutputDescriptor::new(amount, script_pubkey),
        ))
    }

    pub fn txid(&self) -> &Txid {
        &self.txid
    }

    pub fn previous_locking_script(&self) -> &Script {
        &self.previous_locking_script
    }

    pub fn output(&self) -> &OutputDescriptor {
        &self.output
    }

    /// The transaction with the previous locking script in the input slot.
    pub fn unsigned_bytes(&self) -> Result<Vec<u8>> {
        let input = InputDescriptor::new(self.txid, self.previous_locking_script.clone());
        assemble(&input, &self.output)
    }

    /// [`unsigned_bytes`](Self::unsigned_bytes) followed by the SIGHASH_ALL marker.
    pub fn signing_preimage(&self) -> Result<Vec<u8>> {
        let mut preimage = self.unsigned_bytes()?;
        preimage.extend_from_slice(&SIGHASH_ALL_MARKER);
        Ok(preimage)
    }

    /// The digest that gets signed: double SHA-256 of the preimage.
    pub fn sighash(&self) -> Result<[u8; 32]> {
        Ok(double_sha256(&self.signing_preimage()?))
    }

    /// Reassemble with the real ScriptSig. Callers must have verified it.
    pub(crate) fn finalize(self, script_sig: Script) -> Result<SignedTransaction> {
        let input = InputDescriptor::new(self.txid, script_sig);
        let bytes = assemble(&input, &self.output)?;
        Ok(SignedTransaction {
            bytes,
            script_sig: input.script,
        })
    }
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A fully signed, serialized funding transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    bytes: Vec<u8>,
    script_sig: Script,
}

impl SignedTransaction {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn script_sig(&self) -> &Script {
        &self.script_sig
    }

    /// Hex string ready for broadcast.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// The id the network will know this transaction by.
    pub fn txid(&self) -> Txid {
        Txid::from_display_bytes(reverse_bytes(double_sha256(&self.bytes)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
