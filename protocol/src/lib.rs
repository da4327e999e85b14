// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # P2SH Protocol: Core Library
//!
//! Builds, signs, and serializes a transaction that spends one P2PKH output
//! into one P2SH address.
//!
//! The hard part is a dependency cycle: the final transaction embeds a
//! signature computed over an earlier form of the same transaction. That is
//! modeled as two types, [`transaction::UnsignedTransaction`] and
//! [`transaction::SignedTransaction`], with signing as the only way from one
//! to the other.
//!
//! ## Modules
//!
//! - **transaction**: the assembler, the two-stage builder, signing, parsing.
//! - **crypto**: hashes, keys, the scoped secp256k1 context, nonces.
//! - **address**: Base58Check encoding of addresses and WIF keys.
//! - **script**: P2PKH/P2SH locking scripts and the P2PKH ScriptSig.
//! - **config**: fixed layout constants and the runtime [`config::SignerConfig`].
//! - **error**: [`FundingError`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use p2sh_protocol::address::Address;
//! use p2sh_protocol::config::SignerConfig;
//! use p2sh_protocol::transaction::{derive_p2pkh_address, UnsignedTransaction};
//!
//! let config = SignerConfig::default();
//! let wif = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf";
//! let source = derive_p2pkh_address(wif, &config)?;
//! let destination = Address::p2sh(config.network, [0x22; 20]);
//!
//! let signed = UnsignedTransaction::p2pkh_to_p2sh(
//!     "81b4c832d70cb56ff957589752eb4125a4cab78a25a8fc52d6a09e5bd4404d48",
//!     &source,
//!     &destination,
//!     100_000,
//! )?
//! .sign(wif, &config)?;
//!
//! println!("{}", signed.to_hex());
//! # Ok::<(), p2sh_protocol::FundingError>(())
//! ```

pub mod address;
pub mod config;
pub mod crypto;
pub mod error;
pub mod script;
pub mod transaction;

pub use error::FundingError;
