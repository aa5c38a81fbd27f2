//! Taxpayer identification number checks.
//!
//! # Responsibility
//! - Validate the digit-only shape (10 or 12 digits) of a tax id.
//! - Verify positional check digits with the weighted mod-11-mod-10 rule.
//!
//! # Invariants
//! - Only ASCII digits are accepted; no separators or whitespace.
//! - A 10-digit id carries one check digit, a 12-digit id carries two.

use std::fmt::{Display, Formatter};

const WEIGHTS_10: [u32; 9] = [2, 4, 10, 3, 5, 9, 4, 6, 8];
const WEIGHTS_12_FIRST: [u32; 10] = [7, 2, 4, 10, 3, 5, 9, 4, 6, 8];
const WEIGHTS_12_SECOND: [u32; 11] = [3, 7, 2, 4, 10, 3, 5, 9, 4, 6, 8];

/// Reason a tax id was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxIdError {
    /// Contains something other than ASCII digits.
    NonDigit,
    /// Digit count is neither 10 nor 12.
    InvalidLength(usize),
    /// Check digit at the given zero-based position does not match.
    ChecksumMismatch { position: usize },
}

impl Display for TaxIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonDigit => write!(f, "must contain digits only"),
            Self::InvalidLength(len) => write!(f, "must have 10 or 12 digits, got {len}"),
            Self::ChecksumMismatch { position } => {
                write!(f, "check digit at position {} does not match", position + 1)
            }
        }
    }
}

/// Validates a tax id value that has already been trimmed.
pub fn validate_tax_id(value: &str) -> Result<(), TaxIdError> {
    if !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(TaxIdError::NonDigit);
    }

    let digits: Vec<u32> = value.bytes().map(|byte| u32::from(byte - b'0')).collect();
    match digits.len() {
        10 => verify_check_digit(&digits, &WEIGHTS_10),
        12 => {
            verify_check_digit(&digits, &WEIGHTS_12_FIRST)?;
            verify_check_digit(&digits, &WEIGHTS_12_SECOND)
        }
        other => Err(TaxIdError::InvalidLength(other)),
    }
}

/// Computes the check digit that follows `prefix` for the given weights.
///
/// `prefix` must hold at least `weights.len()` digits.
pub fn check_digit(prefix: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = prefix
        .iter()
        .zip(weights.iter())
        .map(|(digit, weight)| digit * weight)
        .sum();
    sum % 11 % 10
}

fn verify_check_digit(digits: &[u32], weights: &[u32]) -> Result<(), TaxIdError> {
    let position = weights.len();
    if check_digit(digits, weights) == digits[position] {
        Ok(())
    } else {
        Err(TaxIdError::ChecksumMismatch { position })
    }
}
