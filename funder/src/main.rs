// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # fund-p2sh
//!
//! Entry point for the `fund-p2sh` binary. Parses CLI arguments, initializes
//! logging, and runs one of four subcommands:
//!
//! - `fund`    : build, sign, and print the funding transaction
//! - `inspect` : decode a hex transaction
//! - `address` : derive a P2PKH address or encode a P2SH address
//! - `version` : print build version information
//!
//! Any failure aborts with a non-zero exit status and nothing on stdout.

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use p2sh_protocol::address::Address;
use p2sh_protocol::config::{Network, PublicKeyFormat, SignerConfig, TX_VERSION};
use p2sh_protocol::transaction::{
    derive_p2pkh_address, parse_transaction_hex, SignedTransaction, UnsignedTransaction,
};

use cli::{AddressArgs, Commands, FundArgs, FunderCli, InspectArgs, NetworkArgs};

fn main() -> Result<()> {
    let cli = FunderCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format());

    match cli.command {
        Commands::Fund(args) => fund(args),
        Commands::Inspect(args) => inspect(args),
        Commands::Address(args) => address(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// JSON report printed by `fund --json`.
#[derive(Debug, Serialize)]
struct FundingReport {
    txid: String,
    size: usize,
    network: Network,
    source: String,
    destination: String,
    amount: u64,
    hex: String,
}

impl FundingReport {
    fn new(signed: &SignedTransaction, source: &Address, destination: &Address, amount: u64) -> Self {
        Self {
            txid: signed.txid().to_hex(),
            size: signed.len(),
            network: source.network(),
            source: source.encode(),
            destination: destination.encode(),
            amount,
            hex: signed.to_hex(),
        }
    }
}

fn signer_config(args: &NetworkArgs) -> SignerConfig {
    let config = SignerConfig::new(args.network);
    if args.compressed {
        config.with_public_key_format(PublicKeyFormat::Compressed)
    } else {
        config
    }
}

/// Runs the funding pipeline and prints the signed transaction.
fn fund(args: FundArgs) -> Result<()> {
    let config = signer_config(&args.network).with_nonce_mode(args.nonce);

    let source = match &args.public_key {
        Some(encoded) => Address::decode_p2pkh(encoded, config.network)
            .with_context(|| format!("invalid source address {encoded}"))?,
        None => {
            let derived = derive_p2pkh_address(&args.private_key, &config)
                .context("failed to derive the source address from the private key")?;
            tracing::info!(source = %derived, "source address derived from private key");
            derived
        }
    };
    let destination = Address::decode_p2sh(&args.destination, config.network)
        .with_context(|| format!("invalid destination address {}", args.destination))?;

    tracing::info!(
        network = %config.network,
        source = %source,
        destination = %destination,
        amount = args.satoshis,
        "building funding transaction"
    );

    let unsigned = UnsignedTransaction::p2pkh_to_p2sh(
        &args.input_transaction,
        &source,
        &destination,
        args.satoshis,
    )
    .context("failed to build the unsigned transaction")?;

    let signed = unsigned
        .sign(&args.private_key, &config)
        .context("failed to sign the transaction")?;

    if args.json {
        let report = FundingReport::new(&signed, &source, &destination, args.satoshis);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    } else {
        println!("{}", signed.to_hex());
    }

    Ok(())
}

/// Decodes a raw transaction and prints its fields.
fn inspect(args: InspectArgs) -> Result<()> {
    let parsed = parse_transaction_hex(&args.hex).context("failed to decode transaction")?;

    let kind = if parsed.script_pubkey.is_p2sh() {
        "p2sh"
    } else if parsed.script_pubkey.is_p2pkh() {
        "p2pkh"
    } else {
        "nonstandard"
    };

    println!("version        : {}", parsed.version);
    println!("previous txid  : {}", parsed.previous_txid);
    println!("previous index : {}", parsed.previous_output_index);
    println!("script_sig     : {}", parsed.script_sig.to_hex());
    println!("sequence       : {:#010x}", parsed.sequence);
    println!("amount         : {}", parsed.amount);
    println!("script_pubkey  : {} ({kind})", parsed.script_pubkey.to_hex());
    println!("lock time      : {}", parsed.lock_time);

    Ok(())
}

/// Derives a P2PKH address from a key, or encodes a P2SH address.
fn address(args: AddressArgs) -> Result<()> {
    let config = signer_config(&args.network);
    let network = config.network;

    let address = if let Some(wif) = &args.private_key {
        derive_p2pkh_address(wif, &config).context("failed to derive address")?
    } else if let Some(hash_hex) = &args.script_hash {
        let bytes = hex::decode(hash_hex.trim()).context("script hash is not valid hex")?;
        let hash: [u8; 20] = match bytes.try_into() {
            Ok(hash) => hash,
            Err(bytes) => bail!("script hash must be 20 bytes, got {}", bytes.len()),
        };
        Address::p2sh(network, hash)
    } else if let Some(script_hex) = &args.redeem_script {
        let script = hex::decode(script_hex.trim()).context("redeem script is not valid hex")?;
        Address::from_redeem_script(network, &script)
    } else {
        bail!("one of --private-key, --script-hash, or --redeem-script is required");
    };

    println!("{address}");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("fund-p2sh   {}", env!("CARGO_PKG_VERSION"));
    println!("tx version  {}", TX_VERSION);
    println!("rustc       {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
