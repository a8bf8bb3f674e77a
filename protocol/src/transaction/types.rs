//! Core type definitions for DAG Ledger transactions.
//!
//! A [`Transaction`] is a plain value: ordered inputs, ordered outputs and a
//! handful of scalar fields. Every type here derives `Clone`, and `Clone` is
//! a deep structural copy. Callers that want to "modify and re-hash" clone
//! first; the hashing core only ever borrows.
//!
//! Byte fields serialize as lowercase hex so that JSON fixtures stay
//! readable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SUBNETWORK_ID_SIZE;
use crate::crypto::hash::Hash;

/// Transaction identifiers are plain digests.
pub type TransactionId = Hash;

// ---------------------------------------------------------------------------
// SubnetworkId
// ---------------------------------------------------------------------------

/// Fixed-width subnetwork identifier.
///
/// The all-zero ID marks a native transaction. Any other value makes the
/// transaction a subnetwork transaction whose `gas` and `payload` are part of
/// every signature hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SubnetworkId(#[serde(with = "hex_array")] [u8; SUBNETWORK_ID_SIZE]);

impl SubnetworkId {
    /// Native value transfers.
    pub const NATIVE: SubnetworkId = SubnetworkId([0u8; SUBNETWORK_ID_SIZE]);

    /// Coinbase transactions.
    pub const COINBASE: SubnetworkId = SubnetworkId::from_prefix(1);

    /// Subnetwork registry transactions.
    pub const REGISTRY: SubnetworkId = SubnetworkId::from_prefix(2);

    const fn from_prefix(first: u8) -> Self {
        let mut bytes = [0u8; SUBNETWORK_ID_SIZE];
        bytes[0] = first;
        Self(bytes)
    }

    /// Wraps raw identifier bytes.
    pub const fn from_bytes(bytes: [u8; SUBNETWORK_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds an identifier from a short prefix, zero-padding the rest.
    /// Returns `None` if `prefix` is longer than the identifier.
    pub fn from_slice_padded(prefix: &[u8]) -> Option<Self> {
        if prefix.len() > SUBNETWORK_ID_SIZE {
            return None;
        }
        let mut bytes = [0u8; SUBNETWORK_ID_SIZE];
        bytes[..prefix.len()].copy_from_slice(prefix);
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SUBNETWORK_ID_SIZE] {
        &self.0
    }

    /// Returns `true` for [`SubnetworkId::NATIVE`].
    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }

    /// Returns `true` for the protocol-defined subnetworks (native, coinbase,
    /// registry).
    pub fn is_builtin(&self) -> bool {
        *self == Self::NATIVE || *self == Self::COINBASE || *self == Self::REGISTRY
    }
}

impl fmt::Display for SubnetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for SubnetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubnetworkId({})", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// ScriptPublicKey & UtxoEntry
// ---------------------------------------------------------------------------

/// A locking script together with its script-engine version tag.
///
/// The script bytes are opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScriptPublicKey {
    pub version: u16,
    #[serde(with = "hex_bytes")]
    pub script: Vec<u8>,
}

impl ScriptPublicKey {
    pub fn new(version: u16, script: Vec<u8>) -> Self {
        Self { version, script }
    }
}

/// The previously recorded output an input spends, as supplied by the UTXO
/// set. Only `amount` and `script_public_key` are committed to by signature
/// hashes; the remaining fields ride along for validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub amount: u64,
    pub script_public_key: ScriptPublicKey,
    /// DAA score of the block that created the output.
    pub block_daa_score: u64,
    pub is_coinbase: bool,
}

impl UtxoEntry {
    pub fn new(
        amount: u64,
        script_public_key: ScriptPublicKey,
        block_daa_score: u64,
        is_coinbase: bool,
    ) -> Self {
        Self {
            amount,
            script_public_key,
            block_daa_score,
            is_coinbase,
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs & Outputs
// ---------------------------------------------------------------------------

/// Reference to an output of an earlier transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self {
            transaction_id,
            index,
        }
    }
}

impl fmt::Display for TransactionOutpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.index)
    }
}

/// A transaction input.
///
/// `signature_script` is the signature container and is never committed to
/// by a signature hash. `utxo_entry` must be populated by the UTXO-set
/// provider before the input can be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    #[serde(with = "hex_bytes", default)]
    pub signature_script: Vec<u8>,
    pub sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utxo_entry: Option<UtxoEntry>,
}

impl TransactionInput {
    /// An unsigned input with no UTXO entry attached yet.
    pub fn new(previous_outpoint: TransactionOutpoint, sequence: u64) -> Self {
        Self {
            previous_outpoint,
            signature_script: Vec::new(),
            sequence,
            utxo_entry: None,
        }
    }

    /// Attaches the UTXO entry this input spends.
    pub fn with_utxo_entry(mut self, entry: UtxoEntry) -> Self {
        self.utxo_entry = Some(entry);
        self
    }
}

/// A transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: ScriptPublicKey,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: ScriptPublicKey) -> Self {
        Self {
            value,
            script_public_key,
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A DAG Ledger transaction.
///
/// Input and output order is significant: both feed directly into
/// transaction IDs and signature hashes. `gas` and `payload` are only
/// meaningful (and only hashed) for non-native subnetworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u16,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u64,
    pub subnetwork_id: SubnetworkId,
    #[serde(default)]
    pub gas: u64,
    #[serde(with = "hex_bytes", default)]
    pub payload: Vec<u8>,
}

impl Transaction {
    pub fn new(
        version: u16,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        lock_time: u64,
        subnetwork_id: SubnetworkId,
        gas: u64,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            version,
            inputs,
            outputs,
            lock_time,
            subnetwork_id,
            gas,
            payload,
        }
    }

    /// Returns `true` if the transaction lives on the native subnetwork.
    pub fn is_native(&self) -> bool {
        self.subnetwork_id.is_native()
    }

    /// Returns `true` if this is a coinbase transaction.
    pub fn is_coinbase(&self) -> bool {
        self.subnetwork_id == SubnetworkId::COINBASE
    }

    /// Returns `true` if every input carries its UTXO entry.
    pub fn is_fully_populated(&self) -> bool {
        self.inputs.iter().all(|input| input.utxo_entry.is_some())
    }

    /// Sum of all output values. `None` on overflow.
    pub fn total_output_value(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, output| acc.checked_add(output.value))
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

mod hex_array {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::config::SUBNETWORK_ID_SIZE;

    pub fn serialize<S: Serializer>(
        bytes: &[u8; SUBNETWORK_ID_SIZE],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[u8; SUBNETWORK_ID_SIZE], D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes.as_slice().try_into().map_err(|_| {
            serde::de::Error::custom(format!(
                "subnetwork id must be {} bytes, got {}",
                SUBNETWORK_ID_SIZE,
                bytes.len()
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transaction() -> Transaction {
        let spk = ScriptPublicKey::new(0, vec![0x20, 0xAB, 0xAC]);
        let input = TransactionInput::new(TransactionOutpoint::new(Hash::ZERO, 3), 7)
            .with_utxo_entry(UtxoEntry::new(500, spk.clone(), 12, false));
        Transaction::new(
            0,
            vec![input],
            vec![TransactionOutput::new(400, spk)],
            0,
            SubnetworkId::NATIVE,
            0,
            Vec::new(),
        )
    }

    #[test]
    fn builtin_subnetworks() {
        assert!(SubnetworkId::NATIVE.is_native());
        assert!(!SubnetworkId::COINBASE.is_native());
        assert!(SubnetworkId::COINBASE.is_builtin());
        assert!(SubnetworkId::REGISTRY.is_builtin());
        assert_eq!(SubnetworkId::COINBASE.as_bytes()[0], 1);
        assert_eq!(SubnetworkId::REGISTRY.as_bytes()[0], 2);

        let custom = SubnetworkId::from_slice_padded(&[1, 2, 3]).unwrap();
        assert!(!custom.is_builtin());
        assert!(!custom.is_native());
    }

    #[test]
    fn subnetwork_padding_rejects_oversized_prefix() {
        assert!(SubnetworkId::from_slice_padded(&[0u8; SUBNETWORK_ID_SIZE]).is_some());
        assert!(SubnetworkId::from_slice_padded(&[0u8; SUBNETWORK_ID_SIZE + 1]).is_none());
    }

    #[test]
    fn clone_is_deep() {
        // Mutating a clone must never leak into the original snapshot.
        let original = sample_transaction();
        let mut copy = original.clone();
        copy.inputs[0].sequence = 99;
        copy.inputs[0]
            .utxo_entry
            .as_mut()
            .unwrap()
            .script_public_key
            .script
            .push(0xFF);
        copy.outputs[0].value = 1;

        assert_eq!(original.inputs[0].sequence, 7);
        assert_eq!(
            original.inputs[0]
                .utxo_entry
                .as_ref()
                .unwrap()
                .script_public_key
                .script,
            vec![0x20, 0xAB, 0xAC]
        );
        assert_eq!(original.outputs[0].value, 400);
    }

    #[test]
    fn population_check() {
        let mut tx = sample_transaction();
        assert!(tx.is_fully_populated());
        tx.inputs[0].utxo_entry = None;
        assert!(!tx.is_fully_populated());
    }

    #[test]
    fn total_output_value_detects_overflow() {
        let mut tx = sample_transaction();
        assert_eq!(tx.total_output_value(), Some(400));
        tx.outputs
            .push(TransactionOutput::new(u64::MAX, ScriptPublicKey::default()));
        assert_eq!(tx.total_output_value(), None);
    }

    #[test]
    fn transaction_serde_roundtrip() {
        let mut tx = sample_transaction();
        tx.subnetwork_id = SubnetworkId::from_slice_padded(&[9, 9]).unwrap();
        tx.payload = vec![1, 2, 3];
        tx.inputs[0].signature_script = vec![0x41, 0x00];

        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"payload\":\"010203\""));
        let recovered: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, recovered);
    }

    #[test]
    fn subnetwork_id_rejects_wrong_length() {
        let result: Result<SubnetworkId, _> = serde_json::from_str("\"0102\"");
        assert!(result.is_err());
    }

    #[test]
    fn outpoint_display() {
        let outpoint = TransactionOutpoint::new(Hash::ZERO, 5);
        assert_eq!(outpoint.to_string(), format!("{}:5", "0".repeat(64)));
    }
}
