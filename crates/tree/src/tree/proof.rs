//! Inclusion proofs and standalone verification.

use ark_bn254::Fr;

use crate::poseidon::PoseidonHasher;

/// An inclusion proof: one sibling hash and one direction bit per level,
/// ordered from the leaf level upward.
///
/// `indices[l]` is true when the proven node is the right child at level
/// `l`; read LSB-first, the bits spell out the leaf's position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    path: Vec<Fr>,
    indices: Vec<bool>,
}

impl MerkleProof {
    /// Create a proof from siblings and direction bits.
    pub fn new(path: Vec<Fr>, indices: Vec<bool>) -> Self {
        assert_eq!(
            path.len(),
            indices.len(),
            "path and indices must have same length"
        );
        Self { path, indices }
    }

    /// Sibling hashes, leaf level first.
    pub fn path(&self) -> &[Fr] {
        &self.path
    }

    /// Direction at each level: true = proven node is a right child.
    pub fn indices(&self) -> &[bool] {
        &self.indices
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The leaf position encoded by the direction bits (LSB-first).
    pub fn position(&self) -> u64 {
        self.indices
            .iter()
            .enumerate()
            .fold(0u64, |acc, (level, &bit)| {
                if bit {
                    acc + (1u64 << level)
                } else {
                    acc
                }
            })
    }

    /// Recompute the root implied by this proof for the given leaf hash.
    pub fn compute_root(&self, hasher: &PoseidonHasher, leaf: Fr) -> Fr {
        let mut current = leaf;
        for (sibling, &is_right) in self.path.iter().zip(self.indices.iter()) {
            current = if is_right {
                hasher.node_hash(*sibling, current)
            } else {
                hasher.node_hash(current, *sibling)
            };
        }
        current
    }
}

/// Check a proof against an expected root.
///
/// Standalone: an external consumer holding only the leaf hash, the
/// sibling path and the root can validate inclusion without any access to
/// tree storage. A mismatch is an ordinary `false`, not an error.
pub fn verify(hasher: &PoseidonHasher, leaf: Fr, proof: &MerkleProof, expected_root: Fr) -> bool {
    proof.compute_root(hasher, leaf) == expected_root
}

#[cfg(test)]
mod proof_tests {
    use super::*;

    #[test]
    fn test_proof_accessors() {
        let path = vec![Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)];
        let indices = vec![false, true, false];

        let proof = MerkleProof::new(path.clone(), indices.clone());

        assert_eq!(proof.depth(), 3);
        assert_eq!(proof.path(), &path);
        assert_eq!(proof.indices(), &indices);
    }

    #[test]
    fn test_position_is_lsb_first() {
        let depth = 5;
        let proof = MerkleProof::new(
            vec![Fr::from(0u64); depth],
            vec![true, false, true, false, false],
        );
        assert_eq!(proof.position(), 0b00101);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_mismatched_lengths_rejected() {
        MerkleProof::new(vec![Fr::from(1u64)], vec![true, false]);
    }

    #[test]
    fn test_compute_root_deterministic() {
        let hasher = PoseidonHasher::new();
        let proof = MerkleProof::new(
            vec![Fr::from(1u64), Fr::from(2u64)],
            vec![false, true],
        );

        let leaf = Fr::from(77u64);
        assert_eq!(
            proof.compute_root(&hasher, leaf),
            proof.compute_root(&hasher, leaf)
        );
    }

    #[test]
    fn test_orientation_matters() {
        let hasher = PoseidonHasher::new();
        let path = vec![Fr::from(1u64), Fr::from(2u64)];
        let leaf = Fr::from(77u64);

        let left = MerkleProof::new(path.clone(), vec![false, false]);
        let right = MerkleProof::new(path, vec![true, false]);

        assert_ne!(
            left.compute_root(&hasher, leaf),
            right.compute_root(&hasher, leaf)
        );
    }
}
