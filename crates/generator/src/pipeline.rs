//! The claim batch pipeline.
//!
//! Construction is a strictly sequential fold over the dataset (tree
//! insertion mutates shared node storage); proof generation and the
//! per-entry self-check only read finalized state and run in parallel.

use std::sync::Arc;

use ark_bn254::Fr;
use ark_ff::Zero;
use rayon::prelude::*;
use tracing::{error, info};

use airdrop_tree::{
    field, nullifier, verify, DenseMerkleTree, MerkleProof, PoseidonHasher, SparseMerkleTree,
};

use crate::dataset::ClaimRow;
use crate::error::GenerateError;

/// Which authenticated tree shape backs the batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeShape {
    /// Leaves assigned by dataset order, zero-padded to capacity
    Dense,
    /// Leaves slotted by the low bits of the claim key
    Sparse,
}

/// Batch configuration.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub depth: usize,
    pub shape: TreeShape,
    /// Secret mixed into every nullifier; from the environment in the CLI
    pub secret: String,
}

/// One claim after field parsing and hashing, before proof generation.
#[derive(Clone, Debug)]
pub struct PreparedClaim {
    /// Address exactly as it appeared in the dataset
    pub address: String,
    pub key: Fr,
    pub value: Fr,
    pub leaf: Fr,
    pub nullifier: Fr,
    pub nullifier_hash: Fr,
}

/// A claim with its inclusion proof and self-check verdict.
#[derive(Clone, Debug)]
pub struct ProvenClaim {
    pub claim: PreparedClaim,
    pub proof: MerkleProof,
    /// Result of re-verifying the proof against the batch root. A failure
    /// is reported as data, never silently dropped.
    pub is_valid: bool,
}

/// A completed batch: the root plus every claim's proof bundle.
#[derive(Debug)]
pub struct ClaimBatch {
    pub root: Fr,
    pub depth: usize,
    pub total_amount: Fr,
    pub claims: Vec<ProvenClaim>,
}

/// Run the full pipeline: parse rows, build the tree, generate and
/// self-check every proof.
pub fn generate_batch(
    rows: &[ClaimRow],
    config: &BatchConfig,
) -> Result<ClaimBatch, GenerateError> {
    let hasher = Arc::new(PoseidonHasher::new());

    let claims = rows
        .iter()
        .map(|row| prepare_claim(row, &hasher, &config.secret))
        .collect::<Result<Vec<_>, _>>()?;
    info!(claims = claims.len(), depth = config.depth, "dataset prepared");

    let (root, proofs) = match config.shape {
        TreeShape::Dense => {
            let mut tree = DenseMerkleTree::new(config.depth, hasher.clone());
            for claim in &claims {
                tree.insert(claim.leaf)?;
            }
            let root = tree.root();
            let proofs = (0..claims.len())
                .into_par_iter()
                .map(|i| tree.proof(i))
                .collect::<Result<Vec<_>, _>>()?;
            (root, proofs)
        }
        TreeShape::Sparse => {
            let mut tree = SparseMerkleTree::new(config.depth, hasher.clone());
            for claim in &claims {
                tree.insert(claim.key, claim.value);
            }
            let root = tree.root();
            let proofs: Vec<MerkleProof> = claims
                .par_iter()
                .map(|claim| tree.proof(claim.key))
                .collect();
            (root, proofs)
        }
    };

    let proven: Vec<ProvenClaim> = claims
        .into_par_iter()
        .zip(proofs)
        .map(|(claim, proof)| {
            let is_valid = verify(&hasher, claim.leaf, &proof, root);
            ProvenClaim {
                claim,
                proof,
                is_valid,
            }
        })
        .collect();

    // report failures outside the parallel section
    for claim in proven.iter().filter(|p| !p.is_valid) {
        error!(address = %claim.claim.address, "proof failed self-check");
    }
    let invalid = proven.iter().filter(|p| !p.is_valid).count();
    if invalid > 0 {
        error!(invalid, total = proven.len(), "batch contains failing proofs");
    } else {
        info!(claims = proven.len(), "all proofs verified");
    }

    let total_amount = proven
        .iter()
        .fold(Fr::zero(), |acc, p| acc + p.claim.value);

    Ok(ClaimBatch {
        root,
        depth: config.depth,
        total_amount,
        claims: proven,
    })
}

fn prepare_claim(
    row: &ClaimRow,
    hasher: &PoseidonHasher,
    secret: &str,
) -> Result<PreparedClaim, GenerateError> {
    let key = field::parse_address(&row.address).map_err(|e| GenerateError::Dataset {
        row: row.row,
        field: "address",
        reason: e.to_string(),
    })?;
    let value = field::parse_decimal(&row.amount).map_err(|e| GenerateError::Dataset {
        row: row.row,
        field: "amount",
        reason: e.to_string(),
    })?;

    let leaf = hasher.leaf_hash(key, value);
    let nf = nullifier::derive(&row.address, secret);
    let nullifier_hash = nullifier::commit(hasher, key, nf);

    Ok(PreparedClaim {
        address: row.address.clone(),
        key,
        value,
        leaf,
        nullifier: nf,
        nullifier_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ClaimRow;

    fn rows() -> Vec<ClaimRow> {
        vec![
            ClaimRow {
                row: 2,
                address: "0x1111111111111111111111111111111111111111".to_string(),
                amount: "1000".to_string(),
            },
            ClaimRow {
                row: 3,
                address: "0x2222222222222222222222222222222222222222".to_string(),
                amount: "2500".to_string(),
            },
            ClaimRow {
                row: 4,
                address: "0x3333333333333333333333333333333333333333".to_string(),
                amount: "500".to_string(),
            },
        ]
    }

    #[test]
    fn test_dense_batch_all_valid() {
        let config = BatchConfig {
            depth: 5,
            shape: TreeShape::Dense,
            secret: "test-secret".to_string(),
        };
        let batch = generate_batch(&rows(), &config).unwrap();

        assert_eq!(batch.claims.len(), 3);
        assert!(batch.claims.iter().all(|c| c.is_valid));
        assert_eq!(batch.total_amount, Fr::from(4000u64));

        // dense positions follow dataset order
        for (i, claim) in batch.claims.iter().enumerate() {
            assert_eq!(claim.proof.position(), i as u64);
        }
    }

    #[test]
    fn test_sparse_batch_all_valid() {
        let config = BatchConfig {
            depth: 20,
            shape: TreeShape::Sparse,
            secret: "test-secret".to_string(),
        };
        let batch = generate_batch(&rows(), &config).unwrap();

        assert_eq!(batch.claims.len(), 3);
        assert!(batch.claims.iter().all(|c| c.is_valid));
    }

    #[test]
    fn test_dense_batch_capacity() {
        let config = BatchConfig {
            depth: 1,
            shape: TreeShape::Dense,
            secret: "s".to_string(),
        };
        // three claims into a depth-1 tree (capacity 2)
        let err = generate_batch(&rows(), &config).unwrap_err();
        assert!(matches!(err, GenerateError::Tree(_)));
    }

    #[test]
    fn test_bad_amount_carries_row_context() {
        let mut bad = rows();
        bad[1].amount = "12x".to_string();

        let config = BatchConfig {
            depth: 5,
            shape: TreeShape::Dense,
            secret: "s".to_string(),
        };
        let err = generate_batch(&bad, &config).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Dataset { row: 3, field: "amount", .. }
        ));
    }

    #[test]
    fn test_nullifiers_differ_per_address() {
        let config = BatchConfig {
            depth: 5,
            shape: TreeShape::Dense,
            secret: "s".to_string(),
        };
        let batch = generate_batch(&rows(), &config).unwrap();

        assert_ne!(batch.claims[0].claim.nullifier, batch.claims[1].claim.nullifier);
        assert_ne!(
            batch.claims[0].claim.nullifier_hash,
            batch.claims[1].claim.nullifier_hash
        );
    }
}
