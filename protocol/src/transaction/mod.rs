//! # Transaction Module
//!
//! Assembly, signing, and decoding of the single-input, single-output
//! transaction that moves a P2PKH output into a P2SH address.
//!
//! ## Architecture
//!
//! ```text
//! bytes.rs     : Txid byte order, single-byte length prefixes, ByteReader
//! assembler.rs : The fixed-layout serializer (one input, one output)
//! builder.rs   : UnsignedTransaction and SignedTransaction
//! signing.rs   : Double-hash, sign, self-verify, package the ScriptSig
//! parse.rs     : Read the layout back into its fields
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: [`UnsignedTransaction::p2pkh_to_p2sh`] from the spent
//!    outpoint, the source address, and the destination.
//! 2. **Preimage**: the assembler runs with the source's locking script in
//!    the input slot, and `01000000` (SIGHASH_ALL) is appended.
//! 3. **Sign**: [`UnsignedTransaction::sign`] signs the double SHA-256 of
//!    the preimage, verifies it, and runs the assembler again with the real
//!    ScriptSig.
//!
//! The sighash type appears twice in different encodings: four bytes after
//! the preimage, and one byte after the DER signature in the ScriptSig. Only
//! the latter ends up in the broadcast transaction.

pub mod assembler;
pub mod builder;
pub mod bytes;
pub mod parse;
pub mod signing;

pub use assembler::{assemble, assemble_raw, InputDescriptor, OutputDescriptor};
pub use builder::{SignedTransaction, UnsignedTransaction};
pub use bytes::Txid;
pub use parse::{parse_transaction, parse_transaction_hex, ParsedTransaction};
pub use signing::{derive_p2pkh_address, sign_preimage, sign_raw_transaction};
