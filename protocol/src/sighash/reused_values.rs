//! Memoized sub-hashes shared by every input of one transaction.
//!
//! Signing an n-input transaction under `All` would otherwise hash all n
//! outpoints and all n sequences once per input, which is quadratic. The
//! cache computes each sub-hash on first use and hands out the stored value
//! afterwards.
//!
//! ## Validity
//!
//! A cache is bound to the transaction snapshot it was first used with.
//! Nothing checks this: feeding it a different transaction, or the same
//! transaction after a mutation, returns stale sub-hashes and therefore
//! wrong digests. Build a fresh cache per transaction (and per mutation).
//!
//! ## Concurrency
//!
//! Each field is a `OnceCell`, so concurrent workers may share one cache
//! by reference: the first caller of a field computes it under that field's
//! lock, everyone else waits and reads the result. Pre-warming on one thread
//! before fanning out is never required, only cheaper on contention.
//!
//! Sub-hashes are written in the `TransactionSigningReusedValue` domain, so
//! the same cache serves Schnorr and ECDSA digests.

use once_cell::sync::OnceCell;

use crate::crypto::hash::{Hash, HashDomain, HashWriter};
use crate::transaction::hashing::{write_outpoint, write_script_public_key};
use crate::transaction::types::{Transaction, TransactionOutput};

/// Lazily computed sub-hashes for one transaction snapshot.
#[derive(Debug, Default)]
pub struct SighashReusedValues {
    previous_outputs_hash: OnceCell<Hash>,
    sequences_hash: OnceCell<Hash>,
    outputs_hash: OnceCell<Hash>,
    payload_hash: OnceCell<Hash>,
}

impl SighashReusedValues {
    /// A fresh, empty cache. It becomes bound to a transaction on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash over every input's previous outpoint, in input order.
    pub fn previous_outputs_hash(&self, tx: &Transaction) -> Hash {
        *self.previous_outputs_hash.get_or_init(|| {
            tracing::trace!(inputs = tx.inputs.len(), "computing previous outputs hash");
            let mut writer = reused_value_writer();
            for input in &tx.inputs {
                write_outpoint(&mut writer, &input.previous_outpoint);
            }
            writer.finalize()
        })
    }

    /// Hash over every input's sequence number, in input order.
    pub fn sequences_hash(&self, tx: &Transaction) -> Hash {
        *self.sequences_hash.get_or_init(|| {
            tracing::trace!(inputs = tx.inputs.len(), "computing sequences hash");
            let mut writer = reused_value_writer();
            for input in &tx.inputs {
                writer.write_u64(input.sequence);
            }
            writer.finalize()
        })
    }

    /// Hash over every output, in output order.
    pub fn outputs_hash(&self, tx: &Transaction) -> Hash {
        *self.outputs_hash.get_or_init(|| {
            tracing::trace!(outputs = tx.outputs.len(), "computing outputs hash");
            let mut writer = reused_value_writer();
            for output in &tx.outputs {
                write_output(&mut writer, output);
            }
            writer.finalize()
        })
    }

    /// Hash over the payload. [`Hash::ZERO`] for native transactions, whose
    /// payload is never committed to.
    pub fn payload_hash(&self, tx: &Transaction) -> Hash {
        if tx.is_native() {
            return Hash::ZERO;
        }
        *self.payload_hash.get_or_init(|| {
            tracing::trace!(len = tx.payload.len(), "computing payload hash");
            let mut writer = reused_value_writer();
            writer.write_var_bytes(&tx.payload);
            writer.finalize()
        })
    }

    /// Computes every sub-hash up front.
    pub fn warm(&self, tx: &Transaction) {
        self.previous_outputs_hash(tx);
        self.sequences_hash(tx);
        self.outputs_hash(tx);
        self.payload_hash(tx);
    }

    /// Returns `true` if no sub-hash has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.previous_outputs_hash.get().is_none()
            && self.sequences_hash.get().is_none()
            && self.outputs_hash.get().is_none()
            && self.payload_hash.get().is_none()
    }
}

/// Hash of a single output, used by `Single` mode. Not cached: each input
/// index selects a different output.
pub(crate) fn single_output_hash(output: &TransactionOutput) -> Hash {
    let mut writer = reused_value_writer();
    write_output(&mut writer, output);
    writer.finalize()
}

fn reused_value_writer() -> HashWriter {
    HashWriter::new(HashDomain::TransactionSigningReusedValue)
}

fn write_output(writer: &mut HashWriter, output: &TransactionOutput) {
    writer.write_u64(output.value);
    write_script_public_key(writer, &output.script_public_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::types::{
        ScriptPublicKey, SubnetworkId, TransactionInput, TransactionOutpoint,
    };

    fn sample_transaction(subnetwork_id: SubnetworkId) -> Transaction {
        let spk = ScriptPublicKey::new(0, vec![0x51]);
        Transaction::new(
            0,
            (0..3)
                .map(|i| TransactionInput::new(TransactionOutpoint::new(Hash::ZERO, i), i as u64))
                .collect(),
            vec![
                TransactionOutput::new(10, spk.clone()),
                TransactionOutput::new(20, spk),
            ],
            0,
            subnetwork_id,
            0,
            vec![1, 2, 3],
        )
    }

    #[test]
    fn starts_empty_and_fills_on_demand() {
        let tx = sample_transaction(SubnetworkId::COINBASE);
        let cache = SighashReusedValues::new();
        assert!(cache.is_empty());

        cache.sequences_hash(&tx);
        assert!(!cache.is_empty());
        assert!(cache.previous_outputs_hash.get().is_none());

        cache.warm(&tx);
        assert!(cache.previous_outputs_hash.get().is_some());
        assert!(cache.outputs_hash.get().is_some());
        assert!(cache.payload_hash.get().is_some());
    }

    #[test]
    fn values_are_memoized_per_instance() {
        // The cache is bound to its first transaction: a later, different
        // transaction gets the stale value back.
        let tx = sample_transaction(SubnetworkId::NATIVE);
        let cache = SighashReusedValues::new();
        let first = cache.outputs_hash(&tx);

        let mut mutated = tx.clone();
        mutated.outputs[0].value = 999;
        assert_eq!(cache.outputs_hash(&mutated), first);
        assert_ne!(SighashReusedValues::new().outputs_hash(&mutated), first);
    }

    #[test]
    fn native_payload_hash_is_zero_and_not_cached() {
        let tx = sample_transaction(SubnetworkId::NATIVE);
        let cache = SighashReusedValues::new();
        assert_eq!(cache.payload_hash(&tx), Hash::ZERO);
        assert!(cache.payload_hash.get().is_none());
    }

    #[test]
    fn sub_hashes_are_distinct() {
        let tx = sample_transaction(SubnetworkId::COINBASE);
        let cache = SighashReusedValues::new();
        let hashes = [
            cache.previous_outputs_hash(&tx),
            cache.sequences_hash(&tx),
            cache.outputs_hash(&tx),
            cache.payload_hash(&tx),
        ];
        for (i, a) in hashes.iter().enumerate() {
            for b in &hashes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn single_output_hash_matches_outputs_hash_for_one_output() {
        let mut tx = sample_transaction(SubnetworkId::NATIVE);
        tx.outputs.truncate(1);
        // Same writer, same single output: the Single-mode hash of output 0
        // equals the All-mode hash when there is only one output.
        let cache = SighashReusedValues::new();
        assert_eq!(single_output_hash(&tx.outputs[0]), cache.outputs_hash(&tx));
    }

    #[test]
    fn cache_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SighashReusedValues>();
    }
}
