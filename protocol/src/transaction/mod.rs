//! # Transaction Module
//!
//! The ledger's transaction data model and everything that hashes, signs
//! or verifies it.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        - Transaction, inputs, outputs, outpoints, UTXO entries, subnetworks
//! builder.rs      - Fluent TransactionBuilder for constructing unsigned transactions
//! hashing.rs      - Transaction ID and full transaction hash
//! signing.rs      - Signature scripts from an external InputSigner
//! verification.rs - Signature scripts checked by an external SignatureVerifier
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: Use [`TransactionBuilder`] with populated UTXO entries.
//! 2. **Sign**: Call [`sign_transaction`] with a signer for one scheme.
//! 3. **Identify**: [`transaction_id`] is stable across signing.
//! 4. **Verify**: Validators run [`verify_transaction`] with the matching
//!    verifier.
//!
//! ## Design Decisions
//!
//! - The transaction ID excludes signature scripts, so signing never changes
//!   it. [`transaction_hash`] covers them.
//! - All amounts are `u64` in the smallest denomination.
//! - Elliptic-curve primitives stay outside this crate behind the
//!   [`InputSigner`] and [`SignatureVerifier`] traits.

pub mod builder;
pub mod hashing;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{TransactionBuilder, TX_VERSION};
pub use hashing::{transaction_hash, transaction_id};
pub use signing::{sign_input, sign_transaction, InputSigner, SigningError};
pub use types::{
    ScriptPublicKey, SubnetworkId, Transaction, TransactionId, TransactionInput,
    TransactionOutpoint, TransactionOutput, UtxoEntry,
};
pub use verification::{
    parse_signature_script, verify_input, verify_transaction, SignatureVerifier,
    VerificationError,
};
