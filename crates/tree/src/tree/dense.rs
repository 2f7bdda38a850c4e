//! Dense Merkle tree with sequentially indexed leaves.
//!
//! Leaves are appended in dataset order and the remainder of the bottom
//! layer is implicitly padded with the empty element. Layers above the
//! leaves are materialized only as far as real entries reach; a missing
//! right sibling at any level stands for the precomputed all-empty
//! subtree hash of that level, never for a literal zero, so a partially
//! filled tree produces the same root it would have if the padding were
//! materialized.

use std::sync::Arc;

use ark_bn254::Fr;
use ark_ff::Zero;

use super::proof::MerkleProof;
use crate::error::TreeError;
use crate::poseidon::PoseidonHasher;

/// Fixed-depth Merkle tree over leaf hashes assigned by insertion order.
#[derive(Clone)]
pub struct DenseMerkleTree {
    depth: usize,
    capacity: usize,
    hasher: Arc<PoseidonHasher>,
    /// layers[0] holds the leaves; layers[depth] holds at most the root
    layers: Vec<Vec<Fr>>,
    /// zeros[l] = hash of an all-empty subtree of height l
    zeros: Vec<Fr>,
}

impl DenseMerkleTree {
    /// Create an empty tree of the given depth.
    pub fn new(depth: usize, hasher: Arc<PoseidonHasher>) -> Self {
        let zeros = hasher.empty_subtree_roots(depth);
        Self {
            depth,
            capacity: 1usize << depth,
            hasher,
            layers: vec![Vec::new(); depth + 1],
            zeros,
        }
    }

    /// Create a tree from leaves in order.
    pub fn from_leaves(
        depth: usize,
        hasher: Arc<PoseidonHasher>,
        leaves: Vec<Fr>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::new(depth, hasher);
        if leaves.len() > tree.capacity {
            return Err(TreeError::TreeFull {
                capacity: tree.capacity,
            });
        }
        tree.layers[0] = leaves;
        tree.rebuild();
        Ok(tree)
    }

    /// Recompute every populated node from the leaves up.
    fn rebuild(&mut self) {
        for level in 1..=self.depth {
            let prev_len = self.layers[level - 1].len();
            let mut nodes = Vec::with_capacity(prev_len.div_ceil(2));
            for i in 0..prev_len.div_ceil(2) {
                let left = self.layers[level - 1][2 * i];
                let right = self
                    .layers[level - 1]
                    .get(2 * i + 1)
                    .copied()
                    .unwrap_or(self.zeros[level - 1]);
                nodes.push(self.hasher.node_hash(left, right));
            }
            self.layers[level] = nodes;
        }
    }

    /// Append a leaf at the next free index and return that index.
    pub fn insert(&mut self, leaf: Fr) -> Result<usize, TreeError> {
        let index = self.len();
        if index >= self.capacity {
            return Err(TreeError::TreeFull {
                capacity: self.capacity,
            });
        }
        self.update(index, leaf)?;
        Ok(index)
    }

    /// Append several leaves, failing up front if they do not all fit.
    pub fn bulk_insert(&mut self, leaves: &[Fr]) -> Result<(), TreeError> {
        if self.len() + leaves.len() > self.capacity {
            return Err(TreeError::TreeFull {
                capacity: self.capacity,
            });
        }
        for &leaf in leaves {
            self.insert(leaf)?;
        }
        Ok(())
    }

    /// Set the leaf at `index` (or append when `index == len`) and
    /// recompute the ancestor hashes on its path to the root.
    pub fn update(&mut self, index: usize, leaf: Fr) -> Result<(), TreeError> {
        let len = self.len();
        if index > len || index >= self.capacity {
            return Err(TreeError::IndexOutOfRange {
                index,
                len,
                capacity: self.capacity,
            });
        }

        if index == len {
            self.layers[0].push(leaf);
        } else {
            self.layers[0][index] = leaf;
        }

        let mut idx = index;
        for level in 1..=self.depth {
            idx >>= 1;
            let left = self.layers[level - 1][2 * idx];
            let right = self
                .layers[level - 1]
                .get(2 * idx + 1)
                .copied()
                .unwrap_or(self.zeros[level - 1]);
            let parent = self.hasher.node_hash(left, right);
            if idx == self.layers[level].len() {
                self.layers[level].push(parent);
            } else {
                self.layers[level][idx] = parent;
            }
        }
        Ok(())
    }

    /// Overwrite the first occurrence of `leaf` with the empty element.
    pub fn remove(&mut self, leaf: Fr) -> Result<(), TreeError> {
        let index = self.index_of(leaf).ok_or(TreeError::ElementNotFound)?;
        self.remove_by_index(index)
    }

    /// Overwrite the leaf at `index` with the empty element.
    pub fn remove_by_index(&mut self, index: usize) -> Result<(), TreeError> {
        self.update(index, Fr::zero())
    }

    /// Index of the first leaf equal to `leaf`, if any.
    pub fn index_of(&self, leaf: Fr) -> Option<usize> {
        self.layers[0].iter().position(|&l| l == leaf)
    }

    /// Current root; the precomputed empty root when no leaf was inserted.
    pub fn root(&self) -> Fr {
        self.layers[self.depth]
            .first()
            .copied()
            .unwrap_or(self.zeros[self.depth])
    }

    /// Inclusion proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<MerkleProof, TreeError> {
        let len = self.len();
        if index >= len {
            return Err(TreeError::IndexOutOfRange {
                index,
                len,
                capacity: self.capacity,
            });
        }

        let mut path = Vec::with_capacity(self.depth);
        let mut indices = Vec::with_capacity(self.depth);
        let mut idx = index;
        for level in 0..self.depth {
            let sibling = idx ^ 1;
            path.push(
                self.layers[level]
                    .get(sibling)
                    .copied()
                    .unwrap_or(self.zeros[level]),
            );
            indices.push(idx & 1 == 1);
            idx >>= 1;
        }

        Ok(MerkleProof::new(path, indices))
    }

    /// Number of inserted leaves (including removed slots).
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    /// True when no leaf was ever inserted.
    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// Tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Maximum number of leaves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The inserted leaves in order.
    pub fn elements(&self) -> &[Fr] {
        &self.layers[0]
    }

    /// Precomputed all-empty subtree hashes, `zeros[0]` = empty element.
    pub fn zeros(&self) -> &[Fr] {
        &self.zeros
    }
}
