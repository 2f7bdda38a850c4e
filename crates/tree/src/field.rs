//! Field-element parsing and canonical serialization.
//!
//! Every key, value, hash and tree node is a BN254 scalar. The external
//! circuit consumes field elements as base-10 decimal strings of the
//! canonically reduced residue, so decimal is the only serialization used
//! anywhere in the output path.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;
use num_traits::Num;

use crate::error::TreeError;

/// The field modulus as a `BigUint`, for range checks on untrusted input.
pub fn modulus() -> BigUint {
    BigUint::from_bytes_be(&Fr::MODULUS.to_bytes_be())
}

/// Parse a base-10 string into a field element.
///
/// Rejects empty strings, non-digit characters and values at or above the
/// modulus. Dataset amounts go through here, so an out-of-range value is a
/// hard error rather than a silent reduction.
pub fn parse_decimal(s: &str) -> Result<Fr, TreeError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TreeError::InvalidFieldElement(s.to_string()));
    }

    let value = BigUint::from_str_radix(trimmed, 10)
        .map_err(|_| TreeError::InvalidFieldElement(s.to_string()))?;
    if value >= modulus() {
        return Err(TreeError::InvalidFieldElement(s.to_string()));
    }

    Ok(Fr::from_le_bytes_mod_order(&value.to_bytes_le()))
}

/// Parse a hex address (with or without `0x` prefix) into its integer bit
/// pattern as a field element.
///
/// A 160-bit Ethereum-style address always fits; longer hex strings are
/// accepted as long as the value is below the modulus.
pub fn parse_address(s: &str) -> Result<Fr, TreeError> {
    let cleaned = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    if cleaned.is_empty() {
        return Err(TreeError::InvalidFieldElement(s.to_string()));
    }

    // hex::decode requires an even number of digits
    let padded = if cleaned.len() % 2 == 1 {
        format!("0{cleaned}")
    } else {
        cleaned.to_string()
    };
    let bytes =
        hex::decode(&padded).map_err(|_| TreeError::InvalidFieldElement(s.to_string()))?;

    let value = BigUint::from_bytes_be(&bytes);
    if value >= modulus() {
        return Err(TreeError::InvalidFieldElement(s.to_string()));
    }

    Ok(Fr::from_le_bytes_mod_order(&value.to_bytes_le()))
}

/// Canonical decimal string of the reduced residue.
pub fn to_decimal(x: &Fr) -> String {
    BigUint::from_bytes_be(&x.into_bigint().to_bytes_be()).to_string()
}
