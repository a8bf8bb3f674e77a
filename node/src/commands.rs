//! Subcommand implementations.
//!
//! Each command loads a transaction, checks it against the protocol limits
//! and returns a serializable report. Printing is left to `main` so that
//! the reports can be tested without capturing stdout.

use std::fmt;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Serialize;

use dagledger_protocol::config::{MAX_PAYLOAD_SIZE, MAX_TX_INPUTS, MAX_TX_OUTPUTS};
use dagledger_protocol::crypto::Hash;
use dagledger_protocol::sighash::{
    calculate_signature_hash, SigHashType, SighashReusedValues, SignatureScheme,
};
use dagledger_protocol::transaction::{transaction_hash, transaction_id, Transaction};

/// Reads a JSON transaction from `path` and checks it against the limits in
/// [`dagledger_protocol::config`].
pub fn load_transaction(path: &Path) -> Result<Transaction> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transaction file {}", path.display()))?;
    let tx: Transaction = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse transaction JSON in {}", path.display()))?;
    check_limits(&tx)?;

    tracing::info!(
        path = %path.display(),
        inputs = tx.inputs.len(),
        outputs = tx.outputs.len(),
        native = tx.is_native(),
        "transaction loaded"
    );
    Ok(tx)
}

/// Rejects transactions larger than the node is willing to hash.
pub fn check_limits(tx: &Transaction) -> Result<()> {
    ensure!(
        tx.inputs.len() <= MAX_TX_INPUTS,
        "transaction has {} inputs, limit is {}",
        tx.inputs.len(),
        MAX_TX_INPUTS
    );
    ensure!(
        tx.outputs.len() <= MAX_TX_OUTPUTS,
        "transaction has {} outputs, limit is {}",
        tx.outputs.len(),
        MAX_TX_OUTPUTS
    );
    ensure!(
        tx.payload.len() <= MAX_PAYLOAD_SIZE,
        "payload is {} bytes, limit is {}",
        tx.payload.len(),
        MAX_PAYLOAD_SIZE
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// txid
// ---------------------------------------------------------------------------

/// Output of the `txid` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxidReport {
    pub transaction_id: Hash,
    pub transaction_hash: Hash,
}

impl fmt::Display for TxidReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "id   {}", self.transaction_id)?;
        write!(f, "hash {}", self.transaction_hash)
    }
}

pub fn txid(tx: &Transaction) -> TxidReport {
    TxidReport {
        transaction_id: transaction_id(tx),
        transaction_hash: transaction_hash(tx),
    }
}

// ---------------------------------------------------------------------------
// sighash
// ---------------------------------------------------------------------------

/// One digest of the `sighash` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputDigest {
    pub input: usize,
    pub hash_type: SigHashType,
    pub scheme: SignatureScheme,
    pub digest: Hash,
}

impl fmt::Display for InputDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.input, self.hash_type, self.digest)
    }
}

/// Computes digests for `input`, or for every input when `None`, through
/// one shared cache.
pub fn sighash(
    tx: &Transaction,
    hash_type: SigHashType,
    scheme: SignatureScheme,
    input: Option<usize>,
) -> Result<Vec<InputDigest>> {
    let indices: Vec<usize> = match input {
        Some(index) => vec![index],
        None => (0..tx.inputs.len()).collect(),
    };

    let cache = SighashReusedValues::new();
    indices
        .into_iter()
        .map(|index| {
            let digest = calculate_signature_hash(tx, index, hash_type, &cache, scheme)
                .with_context(|| format!("cannot compute signature hash for input {index}"))?;
            Ok(InputDigest {
                input: index,
                hash_type,
                scheme,
                digest,
            })
        })
        .collect()
}
