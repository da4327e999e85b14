//! Decoding of single-input, single-output transactions.
//!
//! Reads back exactly the layout the assembler writes. Transactions with
//! other input or output counts, or with trailing bytes, are rejected with
//! [`FundingError::Parse`].

use crate::config::{INPUT_COUNT, OUTPUT_COUNT};
use crate::error::{FundingError, Result};
use crate::script::Script;

use super::bytes::{ByteReader, Txid};

/// The fields of a decoded funding transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction {
    pub version: u32,
    /// Id of the transaction being spent, in display order.
    pub previous_txid: Txid,
    pub previous_output_index: u32,
    pub script_sig: Script,
    pub sequence: u32,
    pub amount: u64,
    pub script_pubkey: Script,
    pub lock_time: u32,
}

/// Parse raw transaction bytes.
pub fn parse_transaction(bytes: &[u8]) -> Result<ParsedTransaction> {
    let mut reader = ByteReader::new(bytes);

    let version = reader.read_u32_le("version")?;

    let inputs = reader.read_u8("input count")?;
    if inputs != INPUT_COUNT {
        return Err(reader.error(format!("expected {INPUT_COUNT} input, found {inputs}")));
    }
    let previous_txid = Txid::from_wire_bytes(reader.read_array("previous txid")?);
    let previous_output_index = reader.read_u32_le("previous output index")?;
    let script_sig = Script::from_bytes(reader.read_length_prefixed("script_sig")?);
    let sequence = reader.read_u32_le("sequence")?;

    let outputs = reader.read_u8("output count")?;
    if outputs != OUTPUT_COUNT {
        return Err(reader.error(format!("expected {OUTPUT_COUNT} output, found {outputs}")));
    }
    let amount = reader.read_u64_le("amount")?;
    let script_pubkey = Script::from_bytes(reader.read_length_prefixed("script_pubkey")?);

    let lock_time = reader.read_u32_le("lock time")?;

    if reader.remaining() != 0 {
        return Err(reader.error(format!("{} trailing bytes", reader.remaining())));
    }

    Ok(ParsedTransaction {
        version,
        previous_txid,
        previous_output_index,
        script_sig,
        sequence,
        amount,
        script_pubkey,
        lock_time,
    })
}

/// Parse a hex-encoded transaction.
pub fn parse_transaction_hex(hex_str: &str) -> Result<ParsedTransaction> {
    let bytes = hex::decode(hex_str.trim()).map_err(|e| FundingError::Parse {
        offset: 0,
        reason: format!("invalid hex: {e}"),
    })?;
    parse_transaction(&bytes)
}
