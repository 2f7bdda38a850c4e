//! Authenticated Merkle trees over BN254 scalars.
//!
//! This module provides:
//! - [`DenseMerkleTree`]: fixed-depth tree with sequentially indexed,
//!   zero-padded leaves
//! - [`SparseMerkleTree`]: tree keyed by arbitrary field elements with
//!   implicit empty subtrees and content-addressed node storage
//! - [`MerkleProof`] and the standalone [`verify`] function
//!
//! The empty sentinel is the zero element in both shapes. Both shapes use
//! the same path convention, defined once by [`key_bit`]: the navigation
//! bit at tree level `l` (level 0 = leaves) is bit `l` of the key, so a
//! sparse key occupies the slot a dense tree would assign to
//! `key mod 2^depth`, and proofs from either shape verify with the same
//! function.

mod dense;
mod proof;
mod sparse;


pub use dense::DenseMerkleTree;
pub use proof::{verify, MerkleProof};
pub use sparse::SparseMerkleTree;

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};

/// Left/right decision for `key` at tree level `level` (0 = leaf level).
///
/// LSB-first: bit 0 of the key decides the pairing at the leaf level and
/// bit `depth-1` decides under the root. Insertion, proof generation and
/// verification must all route through this single definition.
pub fn key_bit(key: &Fr, level: usize) -> bool {
    key.into_bigint().get_bit(level)
}
