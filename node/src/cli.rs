//! # CLI Interface
//!
//! Defines the command-line argument structure for `dagledger-node` using
//! `clap` derive. Supports three subcommands: `txid`, `sighash`, and
//! `version`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dagledger_protocol::sighash::{SigHashMode, SigHashType, SignatureScheme};

/// DAG Ledger transaction tool.
///
/// Reads JSON transactions whose inputs carry their UTXO entries and prints
/// transaction IDs and per-input signature hashes.
#[derive(Parser, Debug)]
#[command(
    name = "dagledger-node",
    about = "DAG Ledger transaction hashing tool",
    version,
    propagate_version = true
)]
pub struct DagLedgerCli {
    /// Log filter directives, e.g. `info` or `dagledger_protocol=trace`.
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, global = true, env = "DAGLEDGER_LOG", default_value = "warn")]
    pub log: String,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "DAGLEDGER_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the transaction ID and full hash of a JSON transaction.
    Txid(TxidArgs),
    /// Print signature hashes for one input or every input.
    Sighash(SighashArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `txid` subcommand.
#[derive(Parser, Debug)]
pub struct TxidArgs {
    /// Path to the transaction JSON file.
    pub file: PathBuf,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `sighash` subcommand.
#[derive(Parser, Debug)]
pub struct SighashArgs {
    /// Path to the transaction JSON file. Every hashed input must carry its
    /// UTXO entry.
    pub file: PathBuf,

    /// Sighash type: `all`, `none` or `single`, optionally suffixed with
    /// `+anyonecanpay`, or a raw byte such as `0x81`.
    #[arg(long, default_value = "all", value_parser = parse_hash_type)]
    pub hash_type: SigHashType,

    /// Signature scheme the digest is produced for.
    #[arg(long, value_enum, default_value_t = SchemeArg::Schnorr)]
    pub scheme: SchemeArg,

    /// Only hash this input. All inputs are hashed when omitted.
    #[arg(long)]
    pub input: Option<usize>,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Command-line spelling of [`SignatureScheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    Schnorr,
    Ecdsa,
}

impl From<SchemeArg> for SignatureScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Schnorr => SignatureScheme::Schnorr,
            SchemeArg::Ecdsa => SignatureScheme::Ecdsa,
        }
    }
}

/// Parses `all|none|single[+anyonecanpay]` (case-insensitive) or a raw
/// `0x..` byte.
pub fn parse_hash_type(s: &str) -> Result<SigHashType, String> {
    let lower = s.trim().to_lowercase();

    if let Some(hex) = lower.strip_prefix("0x") {
        let raw = u8::from_str_radix(hex, 16).map_err(|e| format!("bad sighash byte: {e}"))?;
        return SigHashType::from_u8(raw).map_err(|e| e.to_string());
    }

    let (base, anyone_can_pay) = match lower.split_once('+') {
        Some((base, "anyonecanpay")) => (base, true),
        Some((_, modifier)) => return Err(format!("unknown modifier `{modifier}`")),
        None => (lower.as_str(), false),
    };
    let mode = match base {
        "all" => SigHashMode::All,
        "none" => SigHashMode::None,
        "single" => SigHashMode::Single,
        other => return Err(format!("unknown sighash mode `{other}`")),
    };
    Ok(SigHashType::new(mode, anyone_can_pay))
}
