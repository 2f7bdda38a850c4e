//! Sparse Merkle tree keyed by field elements.
//!
//! Only the nodes on paths to real entries exist; everything else is an
//! implicit empty subtree, represented by the zero element at every level.
//! Nodes live in a content-addressed map from a node's hash to its child
//! pair, so structurally identical subtrees share one entry and nodes from
//! superseded roots stay addressable, which makes historical-root proofs
//! free (see [`SparseMerkleTree::proof_at`]).

use std::collections::HashMap;
use std::sync::Arc;

use ark_bn254::Fr;
use ark_ff::Zero;

use super::key_bit;
use super::proof::MerkleProof;
use crate::poseidon::PoseidonHasher;

/// Child pair of an internal node.
#[derive(Clone, Copy, Debug)]
struct Node {
    left: Fr,
    right: Fr,
}

impl Node {
    fn empty() -> Self {
        Self {
            left: Fr::zero(),
            right: Fr::zero(),
        }
    }
}

/// Merkle tree over an arbitrary key space with implicit empty subtrees.
///
/// The low `depth` bits of a key select its slot (see [`key_bit`]); a
/// later insert whose key shares those bits replaces the earlier entry's
/// slot, exactly as a dense tree would overwrite that index.
#[derive(Clone)]
pub struct SparseMerkleTree {
    depth: usize,
    hasher: Arc<PoseidonHasher>,
    /// Content-addressed storage: node hash -> (left, right)
    nodes: HashMap<Fr, Node>,
    /// key -> value for every inserted entry
    leaves: HashMap<Fr, Fr>,
    root: Fr,
}

impl SparseMerkleTree {
    /// Create an empty tree of the given depth.
    pub fn new(depth: usize, hasher: Arc<PoseidonHasher>) -> Self {
        Self {
            depth,
            hasher,
            nodes: HashMap::new(),
            leaves: HashMap::new(),
            root: Fr::zero(),
        }
    }

    /// Create a tree from `(key, value)` pairs, inserted in order.
    pub fn from_entries(depth: usize, hasher: Arc<PoseidonHasher>, entries: &[(Fr, Fr)]) -> Self {
        let mut tree = Self::new(depth, hasher);
        for &(key, value) in entries {
            tree.insert(key, value);
        }
        tree
    }

    /// Insert or replace the entry for `key` and update the root.
    pub fn insert(&mut self, key: Fr, value: Fr) {
        let leaf = self.hasher.leaf_hash(key, value);
        self.root = self.insert_at(self.root, key, leaf, self.depth);
        self.leaves.insert(key, value);
    }

    /// Rebuild the subtree of height `height` rooted at `node_hash` with
    /// `leaf` placed at the key's slot, returning the new subtree hash.
    fn insert_at(&mut self, node_hash: Fr, key: Fr, leaf: Fr, height: usize) -> Fr {
        if height == 0 {
            return leaf;
        }

        // the branch under a subtree of height h is decided by bit h-1
        let go_right = key_bit(&key, height - 1);

        let mut node = self.node(node_hash);
        if go_right {
            node.right = self.insert_at(node.right, key, leaf, height - 1);
        } else {
            node.left = self.insert_at(node.left, key, leaf, height - 1);
        }

        let hash = self.hasher.node_hash(node.left, node.right);
        self.nodes.insert(hash, node);
        hash
    }

    /// Resolve a subtree hash to its children; empty or unknown hashes are
    /// empty subtrees, never an error.
    fn node(&self, hash: Fr) -> Node {
        if hash.is_zero() {
            return Node::empty();
        }
        self.nodes.get(&hash).copied().unwrap_or_else(Node::empty)
    }

    /// Inclusion proof for `key` against the current root, ordered
    /// leaf-upward like the dense tree.
    pub fn proof(&self, key: Fr) -> MerkleProof {
        self.proof_at(self.root, key)
    }

    /// Inclusion proof for `key` against `root`, which may be any root this
    /// tree ever had: insertions never overwrite old nodes, so historical
    /// roots stay walkable.
    ///
    /// Once the walk reaches an empty subtree, every deeper sibling is the
    /// empty element.
    pub fn proof_at(&self, root: Fr, key: Fr) -> MerkleProof {
        let mut path = vec![Fr::zero(); self.depth];
        let mut indices = vec![false; self.depth];

        let mut current = root;
        for level in (0..self.depth).rev() {
            let go_right = key_bit(&key, level);
            indices[level] = go_right;

            if current.is_zero() {
                continue;
            }
            match self.nodes.get(&current) {
                Some(node) => {
                    if go_right {
                        path[level] = node.left;
                        current = node.right;
                    } else {
                        path[level] = node.right;
                        current = node.left;
                    }
                }
                None => current = Fr::zero(),
            }
        }

        MerkleProof::new(path, indices)
    }

    /// Check a proof for `(key, value)` against the current root.
    pub fn verify_proof(&self, key: Fr, value: Fr, proof: &MerkleProof) -> bool {
        let leaf = self.hasher.leaf_hash(key, value);
        proof.compute_root(&self.hasher, leaf) == self.root
    }

    /// Current root; the zero element while the tree is empty.
    pub fn root(&self) -> Fr {
        self.root
    }

    /// Value stored for `key`, if any.
    pub fn get(&self, key: &Fr) -> Option<Fr> {
        self.leaves.get(key).copied()
    }

    /// True if `key` was inserted.
    pub fn contains_key(&self, key: &Fr) -> bool {
        self.leaves.contains_key(key)
    }

    /// Number of inserted entries.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// True when nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Inserted `(key, value)` pairs, in arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = (Fr, Fr)> + '_ {
        self.leaves.iter().map(|(&k, &v)| (k, v))
    }
}
