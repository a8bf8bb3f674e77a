// Copyright (c) 2026 DAG Ledger Contributors. MIT License.
// See LICENSE for details.

//! # DAG Ledger Protocol: Core Library
//!
//! Transaction signature hashing for a UTXO ledger laid out as a block DAG.
//! Given a transaction whose inputs carry their spent UTXO entries, the
//! library produces the 32-byte digest each input's signature commits to,
//! for both Schnorr and ECDSA signatures, under every sighash type.
//!
//! ## Architecture
//!
//! - **crypto**: Domain-separated BLAKE3 hashing and the [`crypto::Hash`] type.
//! - **transaction**: Data model, builder, transaction IDs, signing and
//!   verification seams.
//! - **sighash**: Sighash types, the reused-values cache and the calculator.
//! - **config**: Protocol constants: domains, flag bytes, limits.
//!
//! ## Design Philosophy
//!
//! 1. Consensus bytes are fixed. Every field order is written down next to
//!    the code that writes it.
//! 2. The hashing core never mutates a transaction and never panics on
//!    caller input.
//! 3. Curve arithmetic lives elsewhere. This crate hands out digests and
//!    takes signatures back through traits.

pub mod config;
pub mod crypto;
pub mod sighash;
pub mod transaction;
