//! Error types for tree construction and queries.

use thiserror::Error;

/// Errors raised by field-element parsing and tree operations.
///
/// A proof that fails to re-verify is not an error: verification returns
/// `false` as data, and callers decide how to report it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Invalid field element: {0}")]
    InvalidFieldElement(String),
    #[error("Tree is full (capacity {capacity})")]
    TreeFull { capacity: usize },
    #[error("Index {index} out of range (len {len}, capacity {capacity})")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        capacity: usize,
    },
    #[error("Element is not in the merkle tree")]
    ElementNotFound,
}
