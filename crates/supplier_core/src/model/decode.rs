//! Explicit decoders from external text formats into validated suppliers.
//!
//! Each decoder only produces a `SupplierRecord` and hands it to
//! `Supplier::new`, so validation rules live in one place.

use crate::model::supplier::{Supplier, SupplierRecord, SupplierValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of fields in a delimited supplier line.
pub const DELIMITED_FIELD_COUNT: usize = 8;

#[derive(Debug)]
pub enum DecodeError {
    /// Text is not a JSON object with the supplier fields.
    Json(serde_json::Error),
    /// Delimited line does not split into the expected number of fields.
    FieldCount { expected: usize, actual: usize },
    /// Leading id column is not an integer.
    InvalidId(String),
    Validation(SupplierValidationError),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid supplier json: {err}"),
            Self::FieldCount { expected, actual } => {
                write!(f, "expected {expected} delimited fields, got {actual}")
            }
            Self::InvalidId(value) => write!(f, "supplier id `{value}` is not an integer"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::FieldCount { .. } | Self::InvalidId(_) => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<SupplierValidationError> for DecodeError {
    fn from(value: SupplierValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Decodes one JSON object (`{"id": .., "name": .., ...}`) into a supplier.
pub fn supplier_from_json(text: &str) -> Result<Supplier, DecodeError> {
    let record: SupplierRecord = serde_json::from_str(text)?;
    Ok(Supplier::new(record)?)
}

/// Decodes a delimited line in record order:
/// `id, name, contact_name, phone, email, city, address, tax_id`.
///
/// Values are not unquoted; the delimiter must not appear inside a field.
pub fn supplier_from_delimited(line: &str, delimiter: char) -> Result<Supplier, DecodeError> {
    let fields: Vec<&str> = line
        .trim_end_matches(['\r', '\n'])
        .split(delimiter)
        .collect();
    let &[id, name, contact_name, phone, email, city, address, tax_id] = fields.as_slice() else {
        return Err(DecodeError::FieldCount {
            expected: DELIMITED_FIELD_COUNT,
            actual: fields.len(),
        });
    };

    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| DecodeError::InvalidId(id.trim().to_string()))?;

    let record = SupplierRecord {
        id,
        name: name.to_string(),
        contact_name: contact_name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        city: city.to_string(),
        address: address.to_string(),
        tax_id: tax_id.to_string(),
    };
    Ok(Supplier::new(record)?)
}
