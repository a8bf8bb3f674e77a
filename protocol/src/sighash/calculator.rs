//! The signature-hash calculator.
//!
//! Reduces `(transaction, input index, sighash type, scheme)` to the 32-byte
//! digest a signer signs and a verifier checks. This is consensus code:
//! every node must produce byte-identical output, so the field order below
//! is fixed forever.
//!
//! ```text
//! version                       u16
//! previous outpoints            AnyOneCanPay ? own outpoint : hash(all outpoints)
//! own utxo amount               u64
//! own utxo script public key    u16 version ‖ var bytes
//! own sequence                  u64
//! sequences                     All && !AnyOneCanPay ? hash(all sequences) : (nothing)
//! outputs                       All    : hash(all outputs)
//!                               Single : hash(outputs[index]) or ZERO if absent
//!                               None   : ZERO
//! lock time                     u64
//! subnetwork id                 20 raw bytes
//! gas, payload hash             non-native only
//! sighash type                  u8
//! ```
//!
//! The two schemes share this layout and differ only in the writer's
//! domain.

use super::error::SighashError;
use super::reused_values::{single_output_hash, SighashReusedValues};
use super::sighash_type::{SigHashMode, SigHashType};
use crate::crypto::hash::{Hash, HashDomain, HashWriter};
use crate::transaction::hashing::{write_outpoint, write_script_public_key};
use crate::transaction::types::Transaction;

/// The signature algorithm a digest is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
    Schnorr,
    Ecdsa,
}

impl SignatureScheme {
    /// The hash domain digests for this scheme are written in.
    pub const fn domain(self) -> HashDomain {
        match self {
            Self::Schnorr => HashDomain::TransactionSigningSchnorr,
            Self::Ecdsa => HashDomain::TransactionSigningEcdsa,
        }
    }
}

/// Computes the signature hash of `tx` for the input at `input_index`.
///
/// `reused_values` must be fresh or have been used only with this exact
/// transaction snapshot.
///
/// # Errors
///
/// - [`SighashError::InputIndexOutOfRange`] if there is no such input.
/// - [`SighashError::MissingUtxoEntry`] if the input's UTXO entry has not
///   been populated.
pub fn calculate_signature_hash(
    tx: &Transaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &SighashReusedValues,
    scheme: SignatureScheme,
) -> Result<Hash, SighashError> {
    let input = tx
        .inputs
        .get(input_index)
        .ok_or(SighashError::InputIndexOutOfRange {
            index: input_index,
            input_count: tx.inputs.len(),
        })?;
    let utxo_entry = input
        .utxo_entry
        .as_ref()
        .ok_or(SighashError::MissingUtxoEntry { index: input_index })?;

    let mut writer = HashWriter::new(scheme.domain());
    writer.write_u16(tx.version);

    if hash_type.is_anyone_can_pay() {
        write_outpoint(&mut writer, &input.previous_outpoint);
    } else {
        writer.write_hash(&reused_values.previous_outputs_hash(tx));
    }

    writer.write_u64(utxo_entry.amount);
    write_script_public_key(&mut writer, &utxo_entry.script_public_key);
    writer.write_u64(input.sequence);

    if hash_type.is_all() && !hash_type.is_anyone_can_pay() {
        writer.write_hash(&reused_values.sequences_hash(tx));
    }

    let outputs_hash = match hash_type.mode() {
        SigHashMode::All => reused_values.outputs_hash(tx),
        // Missing counterpart output is a zero digest, not an error.
        SigHashMode::Single => tx
            .outputs
            .get(input_index)
            .map_or(Hash::ZERO, single_output_hash),
        SigHashMode::None => Hash::ZERO,
    };
    writer.write_hash(&outputs_hash);

    writer
        .write_u64(tx.lock_time)
        .write_raw(tx.subnetwork_id.as_bytes());

    if !tx.is_native() {
        writer
            .write_u64(tx.gas)
            .write_hash(&reused_values.payload_hash(tx));
    }

    writer.write_u8(hash_type.to_u8());
    Ok(writer.finalize())
}

/// [`calculate_signature_hash`] for Schnorr signatures.
pub fn calculate_signature_hash_schnorr(
    tx: &Transaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &SighashReusedValues,
) -> Result<Hash, SighashError> {
    calculate_signature_hash(
        tx,
        input_index,
        hash_type,
        reused_values,
        SignatureScheme::Schnorr,
    )
}

/// [`calculate_signature_hash`] for ECDSA signatures.
pub fn calculate_signature_hash_ecdsa(
    tx: &Transaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &SighashReusedValues,
) -> Result<Hash, SighashError> {
    calculate_signature_hash(
        tx,
        input_index,
        hash_type,
        reused_values,
        SignatureScheme::Ecdsa,
    )
}

/// Like [`calculate_signature_hash`], but takes the sighash type as the raw
/// byte found on the wire (e.g. the last byte of a signature script).
///
/// # Errors
///
/// Additionally [`SighashError::InvalidSigHashType`] if `raw_hash_type` is
/// not a recognized sighash type.
pub fn calculate_signature_hash_raw(
    tx: &Transaction,
    input_index: usize,
    raw_hash_type: u8,
    reused_values: &SighashReusedValues,
    scheme: SignatureScheme,
) -> Result<Hash, SighashError> {
    let hash_type = SigHashType::from_u8(raw_hash_type)?;
    calculate_signature_hash(tx, input_index, hash_type, reused_values, scheme)
}
