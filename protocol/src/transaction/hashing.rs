//! Transaction IDs and transaction hashes.
//!
//! Both walk the same field order through a [`HashWriter`]; they differ in
//! domain and in whether signature scripts are included. The ID strips
//! them, so it is fixed before signing and stays fixed afterwards.

use super::types::{ScriptPublicKey, Transaction, TransactionId, TransactionOutpoint};
use crate::crypto::hash::{Hash, HashDomain, HashWriter};

/// Computes the transaction ID: the `TransactionId`-domain hash of the
/// transaction with every signature script treated as empty.
pub fn transaction_id(tx: &Transaction) -> TransactionId {
    let mut writer = HashWriter::new(HashDomain::TransactionId);
    write_transaction(&mut writer, tx, false);
    writer.finalize()
}

/// Computes the full transaction hash, signature scripts included.
pub fn transaction_hash(tx: &Transaction) -> Hash {
    let mut writer = HashWriter::new(HashDomain::TransactionHash);
    write_transaction(&mut writer, tx, true);
    writer.finalize()
}

fn write_transaction(writer: &mut HashWriter, tx: &Transaction, include_signatures: bool) {
    writer.write_u16(tx.version);

    writer.write_u64(tx.inputs.len() as u64);
    for input in &tx.inputs {
        write_outpoint(writer, &input.previous_outpoint);
        if include_signatures {
            writer.write_var_bytes(&input.signature_script);
        } else {
            writer.write_var_bytes(&[]);
        }
        writer.write_u64(input.sequence);
    }

    writer.write_u64(tx.outputs.len() as u64);
    for output in &tx.outputs {
        writer.write_u64(output.value);
        write_script_public_key(writer, &output.script_public_key);
    }

    writer
        .write_u64(tx.lock_time)
        .write_raw(tx.subnetwork_id.as_bytes())
        .write_u64(tx.gas)
        .write_var_bytes(&tx.payload);
}

/// Writes an outpoint as `transaction_id ‖ index (u32 LE)`.
pub(crate) fn write_outpoint(writer: &mut HashWriter, outpoint: &TransactionOutpoint) {
    writer
        .write_hash(&outpoint.transaction_id)
        .write_u32(outpoint.index);
}

/// Writes a script public key as `version (u16 LE) ‖ len (u64 LE) ‖ script`.
pub(crate) fn write_script_public_key(writer: &mut HashWriter, spk: &ScriptPublicKey) {
    writer.write_u16(spk.version).write_var_bytes(&spk.script);
}
