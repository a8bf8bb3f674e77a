//! # Domain-Separated Hashing
//!
//! Every protocol hash in DAG Ledger flows through [`HashWriter`]: an
//! incremental BLAKE3 hasher opened in `derive_key` mode with a context
//! string unique to its call site. Transaction IDs, Schnorr sighashes,
//! ECDSA sighashes and the memoized sighash sub-hashes each get their own
//! [`HashDomain`], so a digest computed for one purpose can never be
//! replayed as a digest for another.
//!
//! The context string is hashed into a fresh key, so two writers with
//! different domains start from unrelated internal states.
//!
//! ## Encoding conventions
//!
//! - Integers are written little-endian at their fixed width.
//! - Variable-length byte strings are prefixed with their length as a
//!   little-endian `u64`.
//! - Digests and fixed-width identifiers are written raw.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{
    DOMAIN_SIGNING_ECDSA, DOMAIN_SIGNING_REUSED_VALUE, DOMAIN_SIGNING_SCHNORR,
    DOMAIN_TRANSACTION_HASH, DOMAIN_TRANSACTION_ID, HASH_SIZE,
};

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// A 32-byte protocol digest.
///
/// Displays and serializes as lowercase hex in byte order (no reversal).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// The all-zero digest. Used as the output commitment for `None` mode and
    /// for `Single` mode when no output shares the signing input's index.
    pub const ZERO: Hash = Hash([0u8; HASH_SIZE]);

    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Returns `true` for [`Hash::ZERO`].
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }

    /// Hex-encodes the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

/// Error returned when parsing a [`Hash`] from hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashParseError {
    /// The string is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded bytes are not exactly 32 bytes long.
    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Hash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
        let array: [u8; HASH_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| HashParseError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// HashDomain
// ---------------------------------------------------------------------------

/// The call site a [`HashWriter`] serves. Each variant maps to a distinct
/// `derive_key` context string from [`crate::config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Transaction ID: the transaction with signature scripts stripped.
    TransactionId,
    /// Full transaction hash including signature scripts.
    TransactionHash,
    /// Sighash for Schnorr signatures.
    TransactionSigningSchnorr,
    /// Sighash for ECDSA signatures.
    TransactionSigningEcdsa,
    /// Sub-hashes memoized by the sighash reused-values cache.
    TransactionSigningReusedValue,
}

impl HashDomain {
    /// The BLAKE3 `derive_key` context string for this domain.
    pub const fn context(self) -> &'static str {
        match self {
            Self::TransactionId => DOMAIN_TRANSACTION_ID,
            Self::TransactionHash => DOMAIN_TRANSACTION_HASH,
            Self::TransactionSigningSchnorr => DOMAIN_SIGNING_SCHNORR,
            Self::TransactionSigningEcdsa => DOMAIN_SIGNING_ECDSA,
            Self::TransactionSigningReusedValue => DOMAIN_SIGNING_REUSED_VALUE,
        }
    }
}

// ---------------------------------------------------------------------------
// HashWriter
// ---------------------------------------------------------------------------

/// Incremental, domain-separated hash accumulator.
///
/// The sole hashing primitive of the protocol. Higher layers never touch
/// `blake3` directly; they open a writer for their domain, feed it fields
/// in protocol order, and call [`HashWriter::finalize`].
///
/// # Example
///
/// ```
/// use dagledger_protocol::crypto::hash::{HashDomain, HashWriter};
///
/// let mut writer = HashWriter::new(HashDomain::TransactionId);
/// writer.write_u16(0).write_var_bytes(b"payload");
/// let digest = writer.finalize();
/// assert!(!digest.is_zero());
/// ```
#[derive(Clone)]
pub struct HashWriter {
    hasher: blake3::Hasher,
}

impl HashWriter {
    /// Opens a writer keyed to `domain`.
    pub fn new(domain: HashDomain) -> Self {
        Self {
            hasher: blake3::Hasher::new_derive_key(domain.context()),
        }
    }

    /// Writes raw bytes with no length prefix. Only for fixed-width fields.
    pub fn write_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.hasher.update(bytes);
        self
    }

    /// Writes a byte string prefixed with its length as a little-endian `u64`.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_u64(bytes.len() as u64);
        self.write_raw(bytes)
    }

    /// Writes a digest raw (32 bytes).
    pub fn write_hash(&mut self, hash: &Hash) -> &mut Self {
        self.write_raw(hash.as_bytes())
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.write_raw(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.write_raw(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_raw(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_raw(&value.to_le_bytes())
    }

    /// Writes a boolean as a single `0x00`/`0x01` byte.
    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(u8::from(value))
    }

    /// Consumes the writer and returns the 32-byte digest.
    pub fn finalize(self) -> Hash {
        Hash(*self.hasher.finalize().as_bytes())
    }
}

impl fmt::Debug for HashWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashWriter").finish_non_exhaustive()
    }
}

/// One-shot convenience: hashes `data` in `domain`.
pub fn domain_separated_hash(domain: HashDomain, data: &[u8]) -> Hash {
    let mut writer = HashWriter::new(domain);
    writer.write_raw(data);
    writer.finalize()
}
