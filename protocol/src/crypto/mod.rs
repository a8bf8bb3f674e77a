//! # Cryptographic Primitives for DAG Ledger
//!
//! The hashing foundation everything else stands on. Transaction IDs and
//! signature hashes are all produced by the domain-separated
//! [`HashWriter`]; nothing in the crate calls a raw hash function.
//!
//! Elliptic-curve signing and verification are deliberately absent. They are
//! external primitives that consume the 32-byte digests produced here; see
//! [`crate::transaction::signing`] and [`crate::transaction::verification`]
//! for the seams they plug into.

pub mod hash;

pub use hash::{domain_separated_hash, Hash, HashDomain, HashParseError, HashWriter};
