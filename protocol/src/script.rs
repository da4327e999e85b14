//! Script templates for the three scripts the pipeline handles.
//!
//! - P2PKH locking script: `OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG`
//! - P2SH locking script: `OP_HASH160 <20> OP_EQUAL`
//! - P2PKH unlocking script (ScriptSig): `<DER signature || sighash> <pubkey>`
//!
//! Scripts are opaque byte strings to the assembler. This module is the only
//! place that knows what the bytes mean.

use std::fmt;

use crate::config::{HASH160_LENGTH, MAX_PREFIXED_LENGTH, SIGHASH_ALL_BYTE};
use crate::error::{FundingError, Result};

pub const OP_DUP: u8 = 0x76;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_CHECKSIG: u8 = 0xac;

/// Push-20-bytes opcode. Any value 0x01..=0x4b pushes that many bytes.
pub const OP_PUSHBYTES_20: u8 = 0x14;

/// Length of a P2PKH locking script.
pub const P2PKH_SCRIPT_LEN: usize = 25;

/// Length of a P2SH locking script.
pub const P2SH_SCRIPT_LEN: usize = 23;

/// A serialized script.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// True for the exact `OP_HASH160 <20> OP_EQUAL` shape.
    pub fn is_p2sh(&self) -> bool {
        self.0.len() == P2SH_SCRIPT_LEN
            && self.0[0] == OP_HASH160
            && self.0[1] == OP_PUSHBYTES_20
            && self.0[22] == OP_EQUAL
    }

    /// True for the exact `OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG` shape.
    pub fn is_p2pkh(&self) -> bool {
        self.0.len() == P2PKH_SCRIPT_LEN
            && self.0[..3] == [OP_DUP, OP_HASH160, OP_PUSHBYTES_20]
            && self.0[23..] == [OP_EQUALVERIFY, OP_CHECKSIG]
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Locking scripts
// ---------------------------------------------------------------------------

/// Build the P2PKH locking script for a public key hash.
pub fn p2pkh_locking_script(pubkey_hash: &[u8; HASH160_LENGTH]) -> Script {
    let mut bytes = Vec::with_capacity(P2PKH_SCRIPT_LEN);
    bytes.push(OP_DUP);
    bytes.push(OP_HASH160);
    bytes.push(OP_PUSHBYTES_20);
    bytes.extend_from_slice(pubkey_hash);
    bytes.push(OP_EQUALVERIFY);
    bytes.push(OP_CHECKSIG);
    Script(bytes)
}

/// Build the P2SH locking script for a script hash of unchecked length.
///
/// Fails with [`FundingError::ScriptBuild`] unless the hash is 20 bytes.
pub fn p2sh_locking_script(script_hash: &[u8]) -> Result<Script> {
    let hash: &[u8; HASH160_LENGTH] = script_hash.try_into().map_err(|_| {
        FundingError::ScriptBuild(format!(
            "P2SH script hash must be {HASH160_LENGTH} bytes, got {}",
            script_hash.len()
        ))
    })?;
    Ok(p2sh_locking_script_from_hash(hash))
}

/// Build the P2SH locking script for a 20-byte script hash.
pub fn p2sh_locking_script_from_hash(script_hash: &[u8; HASH160_LENGTH]) -> Script {
    let mut bytes = Vec::with_capacity(P2SH_SCRIPT_LEN);
    bytes.push(OP_HASH160);
    bytes.push(OP_PUSHBYTES_20);
    bytes.extend_from_slice(script_hash);
    bytes.push(OP_EQUAL);
    Script(bytes)
}

// ---------------------------------------------------------------------------
// Unlocking script
// ---------------------------------------------------------------------------

/// Package a DER signature and a serialized public key into a ScriptSig.
///
/// Layout: `len(sig) + 1`, sig, `SIGHASH_ALL` byte, `len(pubkey)`, pubkey.
/// The sighash byte counts toward the first push, which is why the first
/// length is one more than the signature.
pub fn p2pkh_unlocking_script(der_signature: &[u8], public_key: &[u8]) -> Result<Script> {
    let sig_push = der_signature.len() + 1;
    if sig_push > MAX_PREFIXED_LENGTH {
        return Err(FundingError::LengthOverflow {
            field: "signature",
            len: sig_push,
            max: MAX_PREFIXED_LENGTH,
        });
    }
    if public_key.len() > MAX_PREFIXED_LENGTH {
        return Err(FundingError::LengthOverflow {
            field: "public key",
            len: public_key.len(),
            max: MAX_PREFIXED_LENGTH,
        });
    }

    let mut bytes = Vec::with_capacity(2 + sig_push + public_key.len());
    bytes.push(sig_push as u8);
    bytes.extend_from_slice(der_signature);
    bytes.push(SIGHASH_ALL_BYTE);
    bytes.push(public_key.len() as u8);
    bytes.extend_from_slice(public_key);
    Ok(Script(bytes))
}
