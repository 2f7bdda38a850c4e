//! Poseidon-authenticated Merkle trees for private airdrop claims.
//!
//! This crate provides the data structures a claim batch is built from:
//! - Field-element parsing and canonical decimal serialization
//! - A Poseidon hash handle with fixed-arity, domain-separated entry
//!   points for nodes, leaves and nullifier commitments
//! - `DenseMerkleTree` (sequentially indexed, zero-padded leaves) and
//!   `SparseMerkleTree` (keyed by field elements, implicit empty subtrees)
//! - Inclusion proofs with a standalone verifier
//! - Nullifier derivation and commitment
//!
//! Roots, leaf hashes and proofs are bit-for-bit what the external
//! inclusion circuit expects, provided the Poseidon parameters in
//! [`poseidon::poseidon_config`] match the ones the circuit was compiled
//! against.

pub mod error;
pub mod field;
pub mod nullifier;
pub mod poseidon;
pub mod tree;

pub use error::TreeError;
pub use poseidon::{poseidon_config, PoseidonHasher, LEAF_DOMAIN_TAG};
pub use tree::{key_bit, verify, DenseMerkleTree, MerkleProof, SparseMerkleTree};

use ark_bn254::Fr;

/// The scalar field all keys, values, hashes and proofs live in.
pub type FieldElement = Fr;
