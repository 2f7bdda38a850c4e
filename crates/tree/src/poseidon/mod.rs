//! Poseidon hash over the BN254 scalar field.
//!
//! This module provides:
//! - The sponge configuration shared with the external circuit
//! - `PoseidonHasher`, a ready handle exposing the three fixed-arity
//!   hash entry points (node, leaf, nullifier)

mod config;
mod hasher;


pub use config::poseidon_config;
pub use hasher::{PoseidonHasher, LEAF_DOMAIN_TAG};
