//! Claim dataset ingestion.
//!
//! The dataset is a CSV with an `address,amount` header: one hex address
//! and one decimal token amount per row. Rows are returned in file order;
//! the row numbers carried in errors are 1-based and count the header.

use std::fs;
use std::path::Path;

use crate::error::GenerateError;

/// One raw dataset row, unparsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimRow {
    /// 1-based line number in the source file, for error reporting
    pub row: usize,
    pub address: String,
    pub amount: String,
}

/// Read and split the claim CSV.
///
/// Validation here is purely structural (header present, two columns per
/// row); address and amount strings are parsed into field elements by the
/// pipeline so that parse failures carry the same row context.
pub fn load_claims(path: &Path) -> Result<Vec<ClaimRow>, GenerateError> {
    let content = fs::read_to_string(path)?;
    parse_claims(&content)
}

fn parse_claims(content: &str) -> Result<Vec<ClaimRow>, GenerateError> {
    let mut lines = content.lines().enumerate();

    let header = lines
        .next()
        .map(|(_, l)| l.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if !header.starts_with("address") {
        return Err(GenerateError::Dataset {
            row: 1,
            field: "address",
            reason: "missing 'address,amount' header".to_string(),
        });
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let row = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let address = fields.next().unwrap_or_default();
        let amount = fields.next().ok_or(GenerateError::Dataset {
            row,
            field: "amount",
            reason: "missing amount column".to_string(),
        })?;

        if address.is_empty() {
            return Err(GenerateError::Dataset {
                row,
                field: "address",
                reason: "empty address".to_string(),
            });
        }
        if amount.is_empty() {
            return Err(GenerateError::Dataset {
                row,
                field: "amount",
                reason: "empty amount".to_string(),
            });
        }

        rows.push(ClaimRow {
            row,
            address: address.to_string(),
            amount: amount.to_string(),
        });
    }

    Ok(rows)
}

/// Read the claim secret from the `SECRET` environment variable.
pub fn secret_from_env() -> Result<String, GenerateError> {
    std::env::var("SECRET").map_err(|_| GenerateError::MissingSecret)
}
