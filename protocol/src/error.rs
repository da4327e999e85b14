//! Error types for the funding pipeline.
//!
//! Every stage that can fail returns a [`FundingError`]. The pipeline is
//! single-shot: any variant aborts the run and nothing is emitted.

use thiserror::Error;

use crate::address::AddressError;
use crate::crypto::keys::KeyError;

/// Errors that can occur while assembling or signing a transaction.
#[derive(Debug, Error)]
pub enum FundingError {
    /// The input transaction id is not 32 bytes of hex.
    #[error("malformed input transaction id: {0}")]
    MalformedInput(String),

    /// An address string failed Base58Check decoding or has the wrong version.
    #[error("address decode failed: {0}")]
    AddressDecode(#[from] AddressError),

    /// The private key could not be decoded from its WIF form.
    #[error("private key decode failed: {0}")]
    KeyDecode(#[source] KeyError),

    /// A script template rejected its input hash.
    #[error("script build failed: {0}")]
    ScriptBuild(String),

    /// The public key could not be derived from the private key.
    #[error("public key derivation failed: {0}")]
    KeyDerivation(String),

    /// Signing failed or the produced signature did not verify.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A length-prefixed field does not fit in a single length byte.
    #[error("{field} is {len} bytes; a single-byte length prefix allows at most {max}")]
    LengthOverflow {
        /// Which field overflowed.
        field: &'static str,
        /// Actual length in bytes.
        len: usize,
        /// Largest representable length.
        max: usize,
    },

    /// Raw transaction bytes do not follow the single-input, single-output layout.
    #[error("cannot parse transaction at offset {offset}: {reason}")]
    Parse {
        /// Byte offset where parsing stopped.
        offset: usize,
        /// What was expected there.
        reason: String,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, FundingError>;
