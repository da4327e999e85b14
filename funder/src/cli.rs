//! # CLI Interface
//!
//! Defines the command-line argument structure for `fund-p2sh` using
//! `clap` derive. Supports four subcommands: `fund`, `inspect`, `address`,
//! and `version`.

use clap::{Args, Parser, Subcommand};

use p2sh_protocol::config::{Network, NonceMode};

use crate::logging::LogFormat;

/// Build and sign a transaction that moves a P2PKH output into a P2SH address.
///
/// The signed transaction is printed to stdout as hex, ready for broadcast.
/// Nothing is sent to the network.
#[derive(Parser, Debug)]
#[command(
    name = "fund-p2sh",
    about = "Fund a P2SH address from a P2PKH output",
    version,
    propagate_version = true
)]
pub struct FunderCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log output format: pretty or json. Logs always go to stderr.
    #[arg(long, global = true, env = "P2SH_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

impl FunderCli {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_str_lossy(&self.log_format)
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build, sign, and print the funding transaction.
    Fund(FundArgs),
    /// Decode a hex transaction and print its fields.
    Inspect(InspectArgs),
    /// Derive or encode an address.
    Address(AddressArgs),
    /// Print version information and exit.
    Version,
}

/// Network and key options shared by `fund` and `address`.
#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Network whose version bytes the addresses and key must carry.
    #[arg(long, env = "P2SH_NETWORK", default_value_t = Network::Mainnet)]
    pub network: Network,

    /// Use the compressed public key even if the WIF key does not carry
    /// the compression flag.
    #[arg(long, env = "P2SH_COMPRESSED")]
    pub compressed: bool,
}

/// Arguments for the `fund` subcommand.
#[derive(Args, Debug)]
pub struct FundArgs {
    /// WIF-encoded private key controlling the spent output.
    ///
    /// Prefer the environment variable over the flag so the key does not
    /// end up in shell history.
    #[arg(long, env = "P2SH_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// P2PKH address of the spent output. Derived from the key when omitted.
    #[arg(long, env = "P2SH_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// Id of the transaction being spent (64 hex characters, display order).
    #[arg(long, env = "P2SH_INPUT_TRANSACTION")]
    pub input_transaction: String,

    /// Amount to send, in satoshis.
    #[arg(long, env = "P2SH_SATOSHIS")]
    pub satoshis: u64,

    /// Destination P2SH address.
    #[arg(long, env = "P2SH_DESTINATION")]
    pub destination: String,

    /// Nonce mode: deterministic (RFC 6979) or random.
    #[arg(long, env = "P2SH_NONCE", default_value = "deterministic")]
    pub nonce: NonceMode,

    /// Print a JSON report (txid, size, hex) instead of bare hex.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub network: NetworkArgs,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Hex-encoded raw transaction.
    pub hex: String,
}

/// Arguments for the `address` subcommand. Exactly one source is required.
#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["private_key", "script_hash", "redeem_script"])
))]
pub struct AddressArgs {
    /// Derive the P2PKH address of this WIF key.
    ///
    /// Flag only. `P2SH_PRIVATE_KEY` is read by `fund`, not here.
    #[arg(long)]
    pub private_key: Option<String>,

    /// Encode a P2SH address from a 20-byte script hash (hex).
    #[arg(long)]
    pub script_hash: Option<String>,

    /// Encode a P2SH address from a redeem script (hex).
    #[arg(long)]
    pub redeem_script: Option<String>,

    #[command(flatten)]
    pub network: NetworkArgs,
}
