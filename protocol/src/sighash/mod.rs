//! # Signature Hashing
//!
//! The consensus-critical core of the protocol: turning a transaction, an
//! input index, a [`SigHashType`] and a [`SignatureScheme`] into the digest
//! that gets signed.
//!
//! ```text
//! sighash_type.rs   - validated {All, None, Single} × {AnyOneCanPay} modes
//! reused_values.rs  - per-transaction memo of sub-hashes shared by inputs
//! calculator.rs     - field selection and the final digest
//! error.rs          - SighashError
//! ```
//!
//! ## Usage
//!
//! One cache per transaction snapshot, reused across its inputs:
//!
//! ```
//! use dagledger_protocol::crypto::Hash;
//! use dagledger_protocol::sighash::{
//!     calculate_signature_hash, SigHashType, SighashReusedValues, SignatureScheme,
//! };
//! use dagledger_protocol::transaction::{
//!     ScriptPublicKey, TransactionBuilder, TransactionOutpoint, UtxoEntry,
//! };
//!
//! let spk = ScriptPublicKey::new(0, vec![0x51]);
//! let tx = TransactionBuilder::new()
//!     .input(TransactionOutpoint::new(Hash::ZERO, 0), 0, UtxoEntry::new(50, spk.clone(), 0, false))
//!     .input(TransactionOutpoint::new(Hash::ZERO, 1), 0, UtxoEntry::new(50, spk.clone(), 0, false))
//!     .output(90, spk)
//!     .build();
//!
//! let cache = SighashReusedValues::new();
//! for index in 0..tx.inputs.len() {
//!     let digest = calculate_signature_hash(
//!         &tx, index, SigHashType::ALL, &cache, SignatureScheme::Schnorr,
//!     ).unwrap();
//!     assert!(!digest.is_zero());
//! }
//! ```
//!
//! ## Preconditions
//!
//! The transaction must not be mutated while digests are being computed
//! for it, and a cache must never outlive the snapshot it was used with.
//! Neither is checked.

pub mod calculator;
pub mod error;
pub mod reused_values;
pub mod sighash_type;

pub use calculator::{
    calculate_signature_hash, calculate_signature_hash_ecdsa, calculate_signature_hash_raw,
    calculate_signature_hash_schnorr, SignatureScheme,
};
pub use error::SighashError;
pub use reused_values::SighashReusedValues;
pub use sighash_type::{SigHashMode, SigHashType};
