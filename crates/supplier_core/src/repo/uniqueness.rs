//! Supplier uniqueness guard.
//!
//! # Responsibility
//! - Normalize the identifying fields (`name`, `phone`, `email`, `tax_id`).
//! - Find the first stored record that shares any normalized value with a
//!   candidate, and report every field it shares.
//!
//! # Invariants
//! - Normalization never alters stored values; it only shapes comparisons.
//! - A field that normalizes to nothing is absent and never conflicts.
//! - The excluded id is skipped entirely, so a record never conflicts with
//!   itself.
//! - Scanning stops at the first conflicting record in iteration order.
//! - `city`, `address` and `contact_name` never take part.

use crate::model::supplier::{Supplier, SupplierField, SupplierId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Trims and applies full Unicode case folding (`ß` and `ss`, final and
/// medial sigma compare equal); blank input is absent.
pub fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(caseless::default_case_fold_str(trimmed))
}

/// Keeps only the digits of a phone number; no digits means absent.
pub fn normalize_phone(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits)
}

/// Trims a tax id; blank input is absent.
pub fn normalize_tax_id(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Normalized comparison keys of one supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedKeys {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
}

impl NormalizedKeys {
    /// Normalizes raw field values, e.g. ones read straight from storage.
    pub fn from_raw(name: &str, phone: &str, email: &str, tax_id: &str) -> Self {
        Self {
            name: normalize_text(name),
            phone: normalize_phone(phone),
            email: normalize_text(email),
            tax_id: normalize_tax_id(tax_id),
        }
    }

    pub fn of(supplier: &Supplier) -> Self {
        Self::from_raw(
            supplier.name(),
            supplier.phone(),
            supplier.email(),
            supplier.tax_id(),
        )
    }

    /// Returns the fields where both sides are present and equal, in the
    /// order `name, phone, email, tax_id`.
    pub fn shared_fields(&self, other: &NormalizedKeys) -> Vec<SupplierField> {
        [
            (SupplierField::Name, &self.name, &other.name),
            (SupplierField::Phone, &self.phone, &other.phone),
            (SupplierField::Email, &self.email, &other.email),
            (SupplierField::TaxId, &self.tax_id, &other.tax_id),
        ]
        .into_iter()
        .filter_map(|(field, ours, theirs)| match (ours, theirs) {
            (Some(ours), Some(theirs)) if ours == theirs => Some(field),
            _ => None,
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none() && self.tax_id.is_none()
    }
}

/// A candidate shares identifying values with an existing supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniquenessViolation {
    pub fields: Vec<SupplierField>,
    pub conflicting_id: SupplierId,
}

impl Display for UniquenessViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .fields
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "uniqueness violated: [{fields}] already used by supplier {}",
            self.conflicting_id
        )
    }
}

impl Error for UniquenessViolation {}

/// Scans `existing` in order and returns the first conflict with `candidate`.
pub fn find_conflict<I>(
    candidate: &NormalizedKeys,
    existing: I,
    exclude_id: Option<SupplierId>,
) -> Option<UniquenessViolation>
where
    I: IntoIterator<Item = (SupplierId, NormalizedKeys)>,
{
    if candidate.is_empty() {
        return None;
    }

    existing
        .into_iter()
        .filter(|(id, _)| Some(*id) != exclude_id)
        .find_map(|(id, keys)| {
            let fields = candidate.shared_fields(&keys);
            if fields.is_empty() {
                None
            } else {
                Some(UniquenessViolation {
                    fields,
                    conflicting_id: id,
                })
            }
        })
}

/// Fails when `candidate` conflicts with any supplier in `existing` other
/// than `exclude_id`.
pub fn check_uniqueness<'a, I>(
    candidate: &Supplier,
    existing: I,
    exclude_id: Option<SupplierId>,
) -> Result<(), UniquenessViolation>
where
    I: IntoIterator<Item = &'a Supplier>,
{
    let keys = NormalizedKeys::of(candidate);
    let existing = existing
        .into_iter()
        .map(|supplier| (supplier.id(), NormalizedKeys::of(supplier)));

    match find_conflict(&keys, existing, exclude_id) {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}
