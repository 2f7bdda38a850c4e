//! JSON result writing.
//!
//! Two documents per batch: the full tree results (root, per-claim proof
//! and nullifier data, self-check verdicts) and the stripped-down circuit
//! input bundles. Every field element is encoded as the canonical decimal
//! string of its reduced residue; no hex, no sign.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use airdrop_tree::field::to_decimal;

use crate::error::GenerateError;
use crate::pipeline::ClaimBatch;

/// File name of the full tree results document.
pub const RESULTS_FILE: &str = "smt_results.json";

/// File name of the circuit input document.
pub const CIRCUIT_INPUTS_FILE: &str = "inputs_circom.json";

/// Full batch output: tree metadata plus one record per claim.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TreeResults {
    pub root: String,
    pub tree_levels: usize,
    pub hash_function: String,
    pub total_amount: String,
    pub leaves: Vec<LeafRecord>,
}

/// Everything known about one claim.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LeafRecord {
    /// Address as it appeared in the dataset
    pub key: String,
    /// The claim key as a decimal field element
    pub key_uint: String,
    pub value: String,
    pub leaf: String,
    pub nullifier: String,
    pub nullifier_hash: String,
    pub path_elements: Vec<String>,
    /// Leaf position, decimal (the proof's direction bits, LSB-first)
    pub path_indices: String,
    pub is_valid: bool,
}

/// The exact public/private inputs the inclusion circuit expects.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CircuitInput {
    pub leaf: String,
    pub amount: String,
    pub path_indices: String,
    pub path_elements: Vec<String>,
    pub merkle_root: String,
    pub nullifier_hash: String,
}

/// Assemble the full results document from a batch.
pub fn tree_results(batch: &ClaimBatch) -> TreeResults {
    TreeResults {
        root: to_decimal(&batch.root),
        tree_levels: batch.depth,
        hash_function: "Poseidon".to_string(),
        total_amount: to_decimal(&batch.total_amount),
        leaves: batch
            .claims
            .iter()
            .map(|proven| LeafRecord {
                key: proven.claim.address.clone(),
                key_uint: to_decimal(&proven.claim.key),
                value: to_decimal(&proven.claim.value),
                leaf: to_decimal(&proven.claim.leaf),
                nullifier: to_decimal(&proven.claim.nullifier),
                nullifier_hash: to_decimal(&proven.claim.nullifier_hash),
                path_elements: proven.proof.path().iter().map(to_decimal).collect(),
                path_indices: proven.proof.position().to_string(),
                is_valid: proven.is_valid,
            })
            .collect(),
    }
}

/// Assemble the circuit input bundles from a batch.
pub fn circuit_inputs(batch: &ClaimBatch) -> Vec<CircuitInput> {
    let root = to_decimal(&batch.root);
    batch
        .claims
        .iter()
        .map(|proven| CircuitInput {
            leaf: to_decimal(&proven.claim.leaf),
            amount: to_decimal(&proven.claim.value),
            path_indices: proven.proof.position().to_string(),
            path_elements: proven.proof.path().iter().map(to_decimal).collect(),
            merkle_root: root.clone(),
            nullifier_hash: to_decimal(&proven.claim.nullifier_hash),
        })
        .collect()
}

/// Write both documents under `dir`, creating it if needed. Returns the
/// two file paths.
pub fn write_outputs(dir: &Path, batch: &ClaimBatch) -> Result<(PathBuf, PathBuf), GenerateError> {
    fs::create_dir_all(dir)?;

    let results_path = dir.join(RESULTS_FILE);
    fs::write(
        &results_path,
        serde_json::to_string_pretty(&tree_results(batch))?,
    )?;

    let inputs_path = dir.join(CIRCUIT_INPUTS_FILE);
    fs::write(
        &inputs_path,
        serde_json::to_string_pretty(&circuit_inputs(batch))?,
    )?;

    Ok((results_path, inputs_path))
}
