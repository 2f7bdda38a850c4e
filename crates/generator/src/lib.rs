//! Claim batch generation for the airdrop tree.
//!
//! This crate ties the pipeline together:
//! - Dataset ingestion (CSV of `address,amount` rows, secret from env)
//! - Tree construction in either shape, proof generation, self-checks
//! - JSON output for downstream proving and on-chain claiming

pub mod dataset;
pub mod error;
pub mod output;
pub mod pipeline;

pub use dataset::{load_claims, secret_from_env, ClaimRow};
pub use error::GenerateError;
pub use output::{circuit_inputs, tree_results, write_outputs, CircuitInput, TreeResults};
pub use pipeline::{generate_batch, BatchConfig, ClaimBatch, ProvenClaim, TreeShape};
