//! The transaction assembler: one input, one output, fixed field order.
//!
//! ```text
//! version       4  LE, always 1
//! input count   1  always 1
//! prev txid    32  reversed
//! prev index    4  LE, always 0
//! script_sig    1 + n
//! sequence      4  ffffffff
//! output count  1  always 1
//! amount        8  LE satoshis
//! script_pubkey 1 + m
//! lock time     4  always 0
//! ```
//!
//! The assembler does not know whether the input script is the stand-in
//! locking script (unsigned pass) or a real ScriptSig (final pass). It is a
//! pure function of its arguments.

use crate::config::{
    INPUT_COUNT, LOCK_TIME, OUTPUT_COUNT, PREVIOUS_OUTPUT_INDEX, SEQUENCE_FINAL, TX_VERSION,
};
use crate::error::Result;
use crate::script::Script;

use super::bytes::{write_length_prefixed, Txid};

/// Fixed bytes outside the two scripts.
pub const FIXED_OVERHEAD: usize = 4 + 1 + 32 + 4 + 1 + 4 + 1 + 8 + 1 + 4;

/// Offset of the input script's length byte.
pub const SCRIPT_SIG_OFFSET: usize = 4 + 1 + 32 + 4;

/// The single input: which output is spent and the script placed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDescriptor {
    pub txid: Txid,
    pub script: Script,
}

/// The single output: how much is paid and to which locking script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    pub amount: u64,
    pub script_pubkey: Script,
}

impl InputDescriptor {
    pub fn new(txid: Txid, script: Script) -> Self {
        Self { txid, script }
    }
}

impl OutputDescriptor {
    pub fn new(amount: u64, script_pubkey: Script) -> Self {
        Self {
            amount,
            script_pubkey,
        }
    }
}

/// Serialize a single-input, single-output transaction.
///
/// Fails only with [`crate::FundingError::LengthOverflow`] when either script
/// is longer than a single length byte can describe.
pub fn assemble(input: &InputDescriptor, output: &OutputDescriptor) -> Result<Vec<u8>> {
    let mut buf =
        Vec::with_capacity(FIXED_OVERHEAD + input.script.len() + output.script_pubkey.len());

    buf.extend_from_slice(&TX_VERSION.to_le_bytes());

    buf.push(INPUT_COUNT);
    buf.extend_from_slice(&input.txid.wire_bytes());
    buf.extend_from_slice(&PREVIOUS_OUTPUT_INDEX.to_le_bytes());
    write_length_prefixed(&mut buf, "input script", input.script.as_bytes())?;
    buf.extend_from_slice(&SEQUENCE_FINAL.to_le_bytes());

    buf.push(OUTPUT_COUNT);
    buf.extend_from_slice(&output.amount.to_le_bytes());
    write_length_prefixed(&mut buf, "output script", output.script_pubkey.as_bytes())?;

    buf.extend_from_slice(&LOCK_TIME.to_le_bytes());

    Ok(buf)
}

/// [`assemble`] from loose arguments: a hex txid and raw script bytes.
///
/// Fails with [`crate::FundingError::MalformedInput`] when the txid is not
/// 32 bytes of hex.
pub fn assemble_raw(
    input_txid_hex: &str,
    amount: u64,
    spending_script: &[u8],
    paying_script: &[u8],
) -> Result<Vec<u8>> {
    let input = InputDescriptor::new(
        Txid::from_hex(input_txid_hex)?,
        Script::from_bytes(spending_script),
    );
    let output = OutputDescriptor::new(amount, Script::from_bytes(paying_script));
    assemble(&input, &output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FundingError;

    const TXID_HEX: &str = "81b4c832d70cb56ff957589752eb4125a4cab78a25a8fc52d6a09e5bd4404d48";

    fn input(script: &[u8]) -> InputDescriptor {
        InputDescriptor::new(Txid::from_hex(TXID_HEX).unwrap(), Script::from_bytes(script))
    }

    fn output(amount: u64, script: &[u8]) -> OutputDescriptor {
        OutputDescriptor::new(amount, Script::from_bytes(script))
    }

    #[test]
    fn layout_of_known_transaction() {
        let spending = [0xaa; 3];
        let paying = [0xbb; 2];
        let bytes = assemble(&input(&spending), &output(100_000, &paying)).unwrap();

        let mut reversed_txid = hex::decode(TXID_HEX).unwrap();
        reversed_txid.reverse();

        let expected = format!(
            "01000000\
             01\
             {}\
             00000000\
             03aaaaaa\
             ffffffff\
             01\
             a086010000000000\
             02bbbb\
             00000000",
            hex::encode(reversed_txid)
        );
        assert_eq!(hex::encode(&bytes), expected);
        assert_eq!(bytes.len(), FIXED_OVERHEAD + 3 + 2);
    }

    #[test]
    fn assemble_is_deterministic() {
        let a = assemble(&input(&[1, 2, 3]), &output(42, &[4, 5])).unwrap();
        let b = assemble(&input(&[1, 2, 3]), &output(42, &[4, 5])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn script_sig_length_byte_sits_after_outpoint() {
        let bytes = assemble(&input(&[0x51; 25]), &output(1, &[])).unwrap();
        assert_eq!(bytes[SCRIPT_SIG_OFFSET], 25);
        assert_eq!(&bytes[SCRIPT_SIG_OFFSET + 1..SCRIPT_SIG_OFFSET + 26], &[0x51; 25]);
    }

    #[test]
    fn max_amount_is_serialized_little_endian() {
        let bytes = assemble(&input(&[]), &output(u64::MAX, &[])).unwrap();
        let amount_offset = SCRIPT_SIG_OFFSET + 1 + 4 + 1;
        assert_eq!(&bytes[amount_offset..amount_offset + 8], &[0xff; 8]);
    }

    #[test]
    fn oversized_scripts_are_rejected() {
        let err = assemble(&input(&[0u8; 256]), &output(1, &[])).unwrap_err();
        assert!(matches!(
            err,
            FundingError::LengthOverflow {
                field: "input script",
                ..
            }
        ));

        let err = assemble(&input(&[]), &output(1, &[0u8; 300])).unwrap_err();
        assert!(matches!(
            err,
            FundingError::LengthOverflow {
                field: "output script",
                len: 300,
                ..
            }
        ));
    }

    #[test]
    fn assemble_raw_rejects_malformed_txid() {
        let err = assemble_raw("abcd", 1, &[], &[]).unwrap_err();
        assert!(matches!(err, FundingError::MalformedInput(_)));
    }

    #[test]
    fn assemble_raw_matches_assemble() {
        let raw = assemble_raw(TXID_HEX, 9, &[1], &[2]).unwrap();
        let typed = assemble(&input(&[1]), &output(9, &[2])).unwrap();
        assert_eq!(raw, typed);
    }
}
