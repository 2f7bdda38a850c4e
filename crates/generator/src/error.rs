//! Errors for batch generation.

use thiserror::Error;

use airdrop_tree::TreeError;

/// Errors that abort a claim batch.
///
/// A single malformed dataset row fails the whole batch, carrying enough
/// context (row number, field name) for the operator to fix the source
/// data; there is no partial-dataset recovery.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Dataset row {row}, field '{field}': {reason}")]
    Dataset {
        row: usize,
        field: &'static str,
        reason: String,
    },
    #[error("SECRET environment variable is not set")]
    MissingSecret,
    #[error("Tree operation failed: {0}")]
    Tree(#[from] TreeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
