//! Signature verification against recomputed signature hashes.
//!
//! A signature script is a single push of `signature ‖ sighash byte`. The
//! verifier parses it, validates the sighash byte, recomputes the digest
//! for the verifier's scheme and hands `(digest, signature, locking script)`
//! to the external [`SignatureVerifier`]. Checks run cheapest first.

use thiserror::Error;

use super::signing::{MAX_DIRECT_PUSH, OP_PUSH_DATA_1, OP_PUSH_DATA_2};
use super::types::{ScriptPublicKey, Transaction};
use crate::crypto::hash::Hash;
use crate::sighash::{
    calculate_signature_hash_raw, SighashError, SighashReusedValues, SignatureScheme,
};

/// Errors that can occur while verifying an input's signature.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The signature script is not a single well-formed push.
    #[error("malformed signature script on input {index}: {reason}")]
    MalformedSignatureScript { index: usize, reason: String },

    /// The digest could not be recomputed (bad index, missing UTXO entry,
    /// unknown sighash byte).
    #[error(transparent)]
    Sighash(#[from] SighashError),

    /// The external verifier rejected the signature.
    #[error("invalid signature on input {index}")]
    InvalidSignature { index: usize },
}

/// An external verification primitive for one scheme.
pub trait SignatureVerifier {
    /// The scheme this verifier checks. Selects the sighash domain.
    fn scheme(&self) -> SignatureScheme;

    /// Returns `true` if `signature` is valid for `digest` under the key
    /// committed to by `script_public_key`.
    fn verify(&self, digest: &Hash, signature: &[u8], script_public_key: &ScriptPublicKey)
        -> bool;
}

/// Splits a signature script into `(signature, raw sighash byte)`.
pub fn parse_signature_script(script: &[u8]) -> Result<(&[u8], u8), String> {
    let (&opcode, rest) = script
        .split_first()
        .ok_or_else(|| "empty signature script".to_string())?;

    let (len, data) = match opcode {
        n if (n as usize) <= MAX_DIRECT_PUSH => (n as usize, rest),
        OP_PUSH_DATA_1 => {
            let (&len, data) = rest
                .split_first()
                .ok_or_else(|| "truncated push length".to_string())?;
            (len as usize, data)
        }
        OP_PUSH_DATA_2 => {
            if rest.len() < 2 {
                return Err("truncated push length".to_string());
            }
            (u16::from_le_bytes([rest[0], rest[1]]) as usize, &rest[2..])
        }
        other => return Err(format!("unexpected opcode 0x{:02x}", other)),
    };

    if data.len() != len {
        return Err(format!(
            "push declares {} bytes but script carries {}",
            len,
            data.len()
        ));
    }
    let (&hash_type, signature) = data
        .split_last()
        .ok_or_else(|| "push carries no sighash byte".to_string())?;
    if signature.is_empty() {
        return Err("push carries no signature".to_string());
    }
    Ok((signature, hash_type))
}

/// Verifies the signature on input `input_index`.
///
/// `reused_values` must belong to `tx` (see [`SighashReusedValues`]).
pub fn verify_input<V: SignatureVerifier + ?Sized>(
    tx: &Transaction,
    input_index: usize,
    verifier: &V,
    reused_values: &SighashReusedValues,
) -> Result<(), VerificationError> {
    let input = tx
        .inputs
        .get(input_index)
        .ok_or(SighashError::InputIndexOutOfRange {
            index: input_index,
            input_count: tx.inputs.len(),
        })?;

    let (signature, raw_hash_type) =
        parse_signature_script(&input.signature_script).map_err(|reason| {
            VerificationError::MalformedSignatureScript {
                index: input_index,
                reason,
            }
        })?;

    let digest = calculate_signature_hash_raw(
        tx,
        input_index,
        raw_hash_type,
        reused_values,
        verifier.scheme(),
    )?;

    // calculate_signature_hash_raw already rejected a missing entry.
    let script_public_key = match &input.utxo_entry {
        Some(entry) => &entry.script_public_key,
        None => return Err(SighashError::MissingUtxoEntry { index: input_index }.into()),
    };

    if !verifier.verify(&digest, signature, script_public_key) {
        tracing::debug!(input = input_index, "signature rejected");
        return Err(VerificationError::InvalidSignature { index: input_index });
    }
    Ok(())
}

/// Verifies every input of `tx` with one shared cache, stopping at the
/// first failure.
pub fn verify_transaction<V: SignatureVerifier + ?Sized>(
    tx: &Transaction,
    verifier: &V,
) -> Result<(), VerificationError> {
    let reused_values = SighashReusedValues::new();
    for index in 0..tx.inputs.len() {
        verify_input(tx, index, verifier, &reused_values)?;
    }
    tracing::debug!(inputs = tx.inputs.len(), "all input signatures verified");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
