// Copyright (c) 2026 DAG Ledger Contributors. MIT License.
// See LICENSE for details.

//! # DAG Ledger Node Tool
//!
//! Entry point for the `dagledger-node` binary. Parses CLI arguments,
//! initializes logging, and runs one of the hashing subcommands:
//!
//! - `txid`    - transaction ID and full hash of a JSON transaction
//! - `sighash` - per-input signature hashes
//! - `version` - print build version information
//!
//! Results go to stdout; logs go to stderr.

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cli::{Commands, DagLedgerCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = DagLedgerCli::parse();
    logging::init_logging(&cli.log, LogFormat::from_str_lossy(&cli.log_format));

    match cli.command {
        Commands::Txid(args) => {
            let tx = commands::load_transaction(&args.file)?;
            let report = commands::txid(&tx);
            tracing::info!(id = %report.transaction_id, "transaction id computed");
            if args.json {
                print_json(&report)?;
            } else {
                println!("{}", report);
            }
            Ok(())
        }
        Commands::Sighash(args) => {
            let tx = commands::load_transaction(&args.file)?;
            let digests =
                commands::sighash(&tx, args.hash_type, args.scheme.into(), args.input)?;
            tracing::info!(
                count = digests.len(),
                hash_type = %args.hash_type,
                scheme = ?args.scheme,
                "signature hashes computed"
            );
            if args.json {
                print_json(&digests)?;
            } else {
                for digest in &digests {
                    println!("{}", digest);
                }
            }
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode report as JSON")?;
    println!("{}", json);
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("dagledger-node {}", env!("CARGO_PKG_VERSION"));
    println!(
        "tx version     {}",
        dagledger_protocol::transaction::TX_VERSION
    );
    println!("rustc          {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
