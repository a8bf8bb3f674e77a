//! Error types for signature hashing.

use thiserror::Error;

/// Reasons a signature hash cannot be computed.
///
/// Every variant is deterministic: the same input fails the same way on
/// every node, so there is nothing to retry. No fallback digest is ever
/// produced in place of an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SighashError {
    /// The requested input does not exist.
    #[error("input index {index} out of range: transaction has {input_count} inputs")]
    InputIndexOutOfRange { index: usize, input_count: usize },

    /// The input has no UTXO entry attached.
    #[error("input {index} has no UTXO entry")]
    MissingUtxoEntry { index: usize },

    /// The byte is not a recognized sighash type.
    #[error("invalid sighash type 0x{0:02x}")]
    InvalidSigHashType(u8),
}
