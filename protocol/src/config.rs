//! # Protocol Configuration & Constants
//!
//! Every consensus constant the hashing core depends on lives here. These
//! values are part of the protocol: two nodes that disagree on any of them
//! will compute different digests for the same transaction, and at that
//! point one of them is on a fork.
//!
//! Nothing in this file is tunable at runtime. Operator-facing knobs (log
//! level, output format) belong to the node binary's CLI.

// ---------------------------------------------------------------------------
// Digest Parameters
// ---------------------------------------------------------------------------

/// Output length of every protocol hash, in bytes.
pub const HASH_SIZE: usize = 32;

/// Width of a subnetwork identifier, in bytes.
pub const SUBNETWORK_ID_SIZE: usize = 20;

// ---------------------------------------------------------------------------
// Domain Separation Contexts
// ---------------------------------------------------------------------------
//
// Each string is fed to BLAKE3's `derive_key` mode. They must stay unique
// per call site and must never change after launch.

/// Context for transaction IDs (signature scripts stripped).
pub const DOMAIN_TRANSACTION_ID: &str = "TransactionID";

/// Context for full transaction hashes (signature scripts included).
pub const DOMAIN_TRANSACTION_HASH: &str = "TransactionHash";

/// Context for Schnorr signature hashes.
pub const DOMAIN_SIGNING_SCHNORR: &str = "TransactionSigningHash";

/// Context for ECDSA signature hashes.
pub const DOMAIN_SIGNING_ECDSA: &str = "TransactionSigningHashECDSA";

/// Context for the sub-hashes memoized across inputs of one transaction.
pub const DOMAIN_SIGNING_REUSED_VALUE: &str = "TransactionSigningReusedValue";

// ---------------------------------------------------------------------------
// Sighash Flags
// ---------------------------------------------------------------------------

/// Commit to every input and every output.
pub const SIG_HASH_ALL: u8 = 0b0000_0001;

/// Commit to every input and no outputs.
pub const SIG_HASH_NONE: u8 = 0b0000_0010;

/// Commit to every input and the output sharing the signing input's index.
pub const SIG_HASH_SINGLE: u8 = 0b0000_0100;

/// Modifier: commit to the signing input only.
pub const SIG_HASH_ANY_ONE_CAN_PAY: u8 = 0b1000_0000;

/// Bits that carry the base mode once the modifier is cleared.
pub const SIG_HASH_MASK: u8 = !SIG_HASH_ANY_ONE_CAN_PAY;

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Maximum number of inputs the node tooling will hash. Consensus limits are
/// enforced by block validation, which lives outside this crate; this is a
/// sanity bound for operator input.
pub const MAX_TX_INPUTS: usize = 10_000;

/// Maximum number of outputs the node tooling will hash.
pub const MAX_TX_OUTPUTS: usize = 10_000;

/// Maximum payload size, in bytes, accepted by the node tooling.
pub const MAX_PAYLOAD_SIZE: usize = 1024 * 1024;
