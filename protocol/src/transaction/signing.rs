//! Transaction signing.
//!
//! The elliptic-curve primitive is external: anything implementing
//! [`InputSigner`] receives a 32-byte digest and returns signature bytes.
//! This module computes the digest for the signer's scheme, wraps the
//! signature into a signature script (`push(signature ‖ sighash byte)`),
//! and, in [`sign_transaction`], writes the scripts back into the
//! transaction once every digest has been taken.

use thiserror::Error;

use super::types::Transaction;
use crate::crypto::hash::Hash;
use crate::sighash::{
    calculate_signature_hash, SigHashType, SighashError, SighashReusedValues, SignatureScheme,
};

/// Opcode prefix for a push whose length fits in the next byte.
pub(crate) const OP_PUSH_DATA_1: u8 = 0x4c;
/// Opcode prefix for a push whose length fits in the next two bytes.
pub(crate) const OP_PUSH_DATA_2: u8 = 0x4d;
/// Largest push encoded directly in the opcode byte.
pub(crate) const MAX_DIRECT_PUSH: usize = 75;

/// Errors produced while signing.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The digest for the input could not be computed.
    #[error(transparent)]
    Sighash(#[from] SighashError),

    /// The external signer refused or failed.
    #[error("signer failed: {reason}")]
    SignerFailed { reason: String },

    /// The signature does not fit in a single script push.
    #[error("signature of {len} bytes is too large for a signature script")]
    SignatureTooLarge { len: usize },
}

/// An external signing primitive for one key and one scheme.
pub trait InputSigner {
    /// The scheme this signer produces signatures for. Selects the sighash
    /// domain.
    fn scheme(&self) -> SignatureScheme;

    /// Signs a 32-byte digest.
    fn sign(&self, digest: &Hash) -> Result<Vec<u8>, SigningError>;
}

/// Computes the digest for input `input_index` and returns the signature
/// script that authorizes it.
///
/// `reused_values` must belong to `tx` (see [`SighashReusedValues`]).
pub fn sign_input<S: InputSigner + ?Sized>(
    tx: &Transaction,
    input_index: usize,
    hash_type: SigHashType,
    signer: &S,
    reused_values: &SighashReusedValues,
) -> Result<Vec<u8>, SigningError> {
    let digest = calculate_signature_hash(
        tx,
        input_index,
        hash_type,
        reused_values,
        signer.scheme(),
    )?;
    let mut signature = signer.sign(&digest)?;
    signature.push(hash_type.to_u8());
    let script = push_data_script(&signature)?;
    tracing::debug!(
        input = input_index,
        %hash_type,
        scheme = ?signer.scheme(),
        "input signed"
    );
    Ok(script)
}

/// Signs every input of `tx` with one signer and writes the signature
/// scripts back.
///
/// All digests are taken from the unmodified snapshot through one shared
/// cache before any script is written, so the transaction is never mutated
/// while it is being hashed. On error the transaction is left untouched.
pub fn sign_transaction<S: InputSigner + ?Sized>(
    tx: &mut Transaction,
    hash_type: SigHashType,
    signer: &S,
) -> Result<(), SigningError> {
    let reused_values = SighashReusedValues::new();
    let scripts = (0..tx.inputs.len())
        .map(|index| sign_input(tx, index, hash_type, signer, &reused_values))
        .collect::<Result<Vec<_>, _>>()?;

    for (input, script) in tx.inputs.iter_mut().zip(scripts) {
        input.signature_script = script;
    }
    Ok(())
}

/// Encodes `data` as a single minimal push.
pub(crate) fn push_data_script(data: &[u8]) -> Result<Vec<u8>, SigningError> {
    let len = data.len();
    let mut script = Vec::with_capacity(len + 3);
    if len <= MAX_DIRECT_PUSH {
        script.push(len as u8);
    } else if len <= u8::MAX as usize {
        script.push(OP_PUSH_DATA_1);
        script.push(len as u8);
    } else if len <= u16::MAX as usize {
        script.push(OP_PUSH_DATA_2);
        script.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        return Err(SigningError::SignatureTooLarge { len });
    }
    script.extend_from_slice(data);
    Ok(script)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::types::{ScriptPublicKey, TransactionOutpoint, UtxoEntry};

    /// Deterministic stand-in for an EC signer: the "signature" is the digest
    /// followed by a key tag.
    struct TagSigner {
        tag: u8,
        scheme: SignatureScheme,
    }

    impl InputSigner for TagSigner {
        fn scheme(&self) -> SignatureScheme {
            self.scheme
        }

        fn sign(&self, digest: &Hash) -> Result<Vec<u8>, SigningError> {
            let mut sig = digest.as_bytes().to_vec();
            sig.extend_from_slice(&[self.tag; 32]);
            Ok(sig)
        }
    }

    struct FailingSigner;

    impl InputSigner for FailingSigner {
        fn scheme(&self) -> SignatureScheme {
            SignatureScheme::Ecdsa
        }

        fn sign(&self, _digest: &Hash) -> Result<Vec<u8>, SigningError> {
            Err(SigningError::SignerFailed {
                reason: "hardware wallet disconnected".to_string(),
            })
        }
    }

    fn sample_transaction() -> Transaction {
        let spk = ScriptPublicKey::new(0, vec![0x51]);
        TransactionBuilder::new()
            .input(
                TransactionOutpoint::new(Hash::ZERO, 0),
                0,
                UtxoEntry::new(100, spk.clone(), 0, false),
            )
            .input(
                TransactionOutpoint::new(Hash::ZERO, 1),
                1,
                UtxoEntry::new(100, spk.clone(), 0, false),
            )
            .output(150, spk)
            .build()
    }

    #[test]
    fn signature_script_layout() {
        let tx = sample_transaction();
        let signer = TagSigner {
            tag: 7,
            scheme: SignatureScheme::Schnorr,
        };
        let script = sign_input(
            &tx,
            0,
            SigHashType::ALL,
            &signer,
            &SighashReusedValues::new(),
        )
        .unwrap();

        // 64-byte signature + 1 sighash byte, pushed directly.
        assert_eq!(script.len(), 66);
        assert_eq!(script[0], 65);
        assert_eq!(script[65], SigHashType::ALL.to_u8());
    }

    #[test]
    fn sign_transaction_fills_every_input() {
        let mut tx = sample_transaction();
        let signer = TagSigner {
            tag: 1,
            scheme: SignatureScheme::Schnorr,
        };
        sign_transaction(&mut tx, SigHashType::ALL, &signer).unwrap();
        assert!(tx.inputs.iter().all(|input| !input.signature_script.is_empty()));
        assert_ne!(tx.inputs[0].signature_script, tx.inputs[1].signature_script);
    }

    #[test]
    fn signer_scheme_selects_digest_domain() {
        let tx = sample_transaction();
        let cache = SighashReusedValues::new();
        let schnorr = TagSigner {
            tag: 1,
            scheme: SignatureScheme::Schnorr,
        };
        let ecdsa = TagSigner {
            tag: 1,
            scheme: SignatureScheme::Ecdsa,
        };
        let a = sign_input(&tx, 0, SigHashType::ALL, &schnorr, &cache).unwrap();
        let b = sign_input(&tx, 0, SigHashType::ALL, &ecdsa, &cache).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn failed_signing_leaves_transaction_untouched() {
        let mut tx = sample_transaction();
        let before = tx.clone();
        let err = sign_transaction(&mut tx, SigHashType::ALL, &FailingSigner).unwrap_err();
        assert!(matches!(err, SigningError::SignerFailed { .. }));
        assert_eq!(tx, before);
    }

    #[test]
    fn missing_utxo_surfaces_as_sighash_error() {
        let mut tx = sample_transaction();
        tx.inputs[1].utxo_entry = None;
        let signer = TagSigner {
            tag: 1,
            scheme: SignatureScheme::Schnorr,
        };
        let err = sign_transaction(&mut tx, SigHashType::ALL, &signer).unwrap_err();
        assert!(matches!(
            err,
            SigningError::Sighash(SighashError::MissingUtxoEntry { index: 1 })
        ));
        assert!(tx.inputs[0].signature_script.is_empty());
    }

    #[test]
    fn push_encoding_boundaries() {
        assert_eq!(push_data_script(&[0xAA; 75]).unwrap()[0], 75);

        let medium = push_data_script(&[0xAA; 76]).unwrap();
        assert_eq!(&medium[..2], &[OP_PUSH_DATA_1, 76]);
        assert_eq!(medium.len(), 78);

        let large = push_data_script(&[0xAA; 256]).unwrap();
        assert_eq!(&large[..3], &[OP_PUSH_DATA_2, 0x00, 0x01]);

        assert!(matches!(
            push_data_script(&vec![0u8; 70_000]),
            Err(SigningError::SignatureTooLarge { len: 70_000 })
        ));
    }
}
