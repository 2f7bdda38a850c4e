//! The Poseidon hash handle.
//!
//! All hashing goes through [`PoseidonHasher`], which owns the sponge
//! configuration. Constructing the handle is the one-time setup step;
//! once a caller holds one, every hash entry point is infallible, so
//! there is no "backend not ready" state to check for.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::{PoseidonConfig, PoseidonSponge};
use ark_crypto_primitives::sponge::CryptographicSponge;
use ark_ff::Zero;

use super::config::poseidon_config;

/// Fixed third input appended by [`PoseidonHasher::leaf_hash`].
///
/// Leaves absorb `(key, value, 1)` while internal nodes absorb exactly two
/// elements, so a leaf hash can never collide with a node hash. The tag
/// must match the circuit's leaf hasher; it is defined once here and never
/// re-derived at call sites.
pub const LEAF_DOMAIN_TAG: u64 = 1;

/// Fixed-arity Poseidon hash functions over BN254 scalars.
///
/// Cheap to clone by reference counting the config where needed; tree
/// builders share one handle via `Arc<PoseidonHasher>`.
#[derive(Clone)]
pub struct PoseidonHasher {
    config: PoseidonConfig<Fr>,
}

impl PoseidonHasher {
    /// Build the handle. This is the only place the sponge parameters are
    /// materialized.
    pub fn new() -> Self {
        Self {
            config: poseidon_config(),
        }
    }

    /// Combine two children into a parent: `Poseidon(left, right)`.
    pub fn node_hash(&self, left: Fr, right: Fr) -> Fr {
        let mut sponge = PoseidonSponge::new(&self.config);
        sponge.absorb(&left);
        sponge.absorb(&right);
        sponge.squeeze_field_elements(1)[0]
    }

    /// Hash a leaf: `Poseidon(key, value, LEAF_DOMAIN_TAG)`.
    pub fn leaf_hash(&self, key: Fr, value: Fr) -> Fr {
        let mut sponge = PoseidonSponge::new(&self.config);
        sponge.absorb(&key);
        sponge.absorb(&value);
        sponge.absorb(&Fr::from(LEAF_DOMAIN_TAG));
        sponge.squeeze_field_elements(1)[0]
    }

    /// Public commitment to a nullifier: `Poseidon(key, nullifier)`.
    ///
    /// Shares the two-input domain with `node_hash`; the choice is
    /// externally observable (the circuit recomputes it) and fixed here.
    pub fn nullifier_hash(&self, key: Fr, nullifier: Fr) -> Fr {
        self.node_hash(key, nullifier)
    }

    /// Roots of all-empty subtrees for levels `0..=depth`.
    ///
    /// `zeros[0]` is the empty element, `zeros[i] = H(zeros[i-1], zeros[i-1])`.
    /// `zeros[depth]` is the root of an empty dense tree of that depth.
    pub fn empty_subtree_roots(&self, depth: usize) -> Vec<Fr> {
        let mut zeros = Vec::with_capacity(depth + 1);
        zeros.push(Fr::zero());
        for i in 1..=depth {
            let prev = zeros[i - 1];
            zeros.push(self.node_hash(prev, prev));
        }
        zeros
    }
}

impl Default for PoseidonHasher {
    fn default() -> Self {
        Self::new()
    }
}
