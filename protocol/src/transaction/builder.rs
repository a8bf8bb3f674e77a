//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] assembles inputs, outputs and the scalar
//! fields into an unsigned [`Transaction`]. Inputs added with
//! [`TransactionBuilder::input`] carry their UTXO entry, so the result is
//! ready for signature hashing straight away.
//!
//! The builder does not sign. That happens in [`super::signing`], which
//! keeps construction testable without key material.

use super::types::{
    ScriptPublicKey, SubnetworkId, Transaction, TransactionInput, TransactionOutpoint,
    TransactionOutput, UtxoEntry,
};

/// Current transaction version.
pub const TX_VERSION: u16 = 0;

/// Fluent builder for unsigned [`Transaction`] instances.
///
/// # Usage
///
/// ```
/// use dagledger_protocol::crypto::Hash;
/// use dagledger_protocol::transaction::{
///     ScriptPublicKey, SubnetworkId, TransactionBuilder, TransactionOutpoint, UtxoEntry,
/// };
///
/// let spk = ScriptPublicKey::new(0, vec![0x51]);
/// let tx = TransactionBuilder::new()
///     .input(TransactionOutpoint::new(Hash::ZERO, 0), 0, UtxoEntry::new(1_000, spk.clone(), 0, false))
///     .output(900, spk)
///     .lock_time(1_615_462_089_000)
///     .build();
///
/// assert_eq!(tx.subnetwork_id, SubnetworkId::NATIVE);
/// assert!(tx.is_fully_populated());
/// ```
///
/// Defaults: version [`TX_VERSION`], native subnetwork, zero lock time, zero
/// gas, empty payload.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    version: u16,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    lock_time: u64,
    subnetwork_id: SubnetworkId,
    gas: u64,
    payload: Vec<u8>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
            subnetwork_id: SubnetworkId::NATIVE,
            gas: 0,
            payload: Vec::new(),
        }
    }

    /// Sets the transaction version. Only needed for testing version upgrades.
    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    /// Appends an input spending `outpoint`, with its UTXO entry attached.
    pub fn input(mut self, outpoint: TransactionOutpoint, sequence: u64, entry: UtxoEntry) -> Self {
        self.inputs
            .push(TransactionInput::new(outpoint, sequence).with_utxo_entry(entry));
        self
    }

    /// Appends a fully formed input as-is (UTXO entry optional).
    pub fn push_input(mut self, input: TransactionInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// Appends an output.
    pub fn output(mut self, value: u64, script_public_key: ScriptPublicKey) -> Self {
        self.outputs
            .push(TransactionOutput::new(value, script_public_key));
        self
    }

    pub fn lock_time(mut self, lock_time: u64) -> Self {
        self.lock_time = lock_time;
        self
    }

    /// Moves the transaction onto a subnetwork. Gas and payload are only
    /// committed to by signatures when this is not [`SubnetworkId::NATIVE`].
    pub fn subnetwork_id(mut self, subnetwork_id: SubnetworkId) -> Self {
        self.subnetwork_id = subnetwork_id;
        self
    }

    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    pub fn build(self) -> Transaction {
        Transaction::new(
            self.version,
            self.inputs,
            self.outputs,
            self.lock_time,
            self.subnetwork_id,
            self.gas,
            self.payload,
        )
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::Hash;

    fn spk() -> ScriptPublicKey {
        ScriptPublicKey::new(0, vec![0x51])
    }

    #[test]
    fn defaults() {
        let tx = TransactionBuilder::new().build();
        assert_eq!(tx.version, TX_VERSION);
        assert!(tx.inputs.is_empty());
        assert!(tx.outputs.is_empty());
        assert_eq!(tx.lock_time, 0);
        assert!(tx.is_native());
        assert_eq!(tx.gas, 0);
        assert!(tx.payload.is_empty());
    }

    #[test]
    fn preserves_input_and_output_order() {
        let tx = TransactionBuilder::new()
            .input(
                TransactionOutpoint::new(Hash::ZERO, 7),
                1,
                UtxoEntry::new(10, spk(), 0, false),
            )
            .input(
                TransactionOutpoint::new(Hash::ZERO, 3),
                2,
                UtxoEntry::new(20, spk(), 0, false),
            )
            .output(5, spk())
            .output(6, spk())
            .build();

        assert_eq!(tx.inputs[0].previous_outpoint.index, 7);
        assert_eq!(tx.inputs[1].previous_outpoint.index, 3);
        assert_eq!(tx.outputs[0].value, 5);
        assert_eq!(tx.outputs[1].value, 6);
        assert!(tx.is_fully_populated());
    }

    #[test]
    fn push_input_allows_unpopulated_inputs() {
        let tx = TransactionBuilder::new()
            .push_input(TransactionInput::new(TransactionOutpoint::new(Hash::ZERO, 0), 0))
            .build();
        assert!(!tx.is_fully_populated());
    }

    #[test]
    fn subnetwork_fields() {
        let subnetwork = SubnetworkId::from_slice_padded(&[1, 2, 3]).unwrap();
        let tx = TransactionBuilder::new()
            .version(1)
            .lock_time(42)
            .subnetwork_id(subnetwork)
            .gas(250)
            .payload(vec![0xAA])
            .build();
        assert_eq!(tx.version, 1);
        assert_eq!(tx.lock_time, 42);
        assert_eq!(tx.subnetwork_id, subnetwork);
        assert!(!tx.is_native());
        assert_eq!(tx.gas, 250);
        assert_eq!(tx.payload, vec![0xAA]);
    }
}
