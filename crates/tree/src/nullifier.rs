//! Nullifier derivation and commitment.
//!
//! A nullifier is a per-claim tag derived from the claimer's identity and
//! a batch secret. Its Poseidon commitment is published with the proof so
//! reuse can be detected without revealing the nullifier itself; anyone
//! without the secret cannot link a nullifier back to an identity.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use sha2::{Digest, Sha256};

use crate::poseidon::PoseidonHasher;

/// Derive the nullifier for `identity` under `secret`.
///
/// SHA-256 over the identity string followed by the secret, with the
/// digest reduced into the field. Deterministic for a fixed pair; the
/// nullifier itself never goes through Poseidon, only its commitment
/// does, so a general-purpose hash is fine here.
pub fn derive(identity: &str, secret: &str) -> Fr {
    let mut hasher = Sha256::new();
    hasher.update(identity.as_bytes());
    hasher.update(secret.as_bytes());
    Fr::from_be_bytes_mod_order(&hasher.finalize())
}

/// Public commitment: `Poseidon(key, nullifier)`.
pub fn commit(hasher: &PoseidonHasher, key: Fr, nullifier: Fr) -> Fr {
    hasher.nullifier_hash(key, nullifier)
}
