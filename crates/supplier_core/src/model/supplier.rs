//! Supplier domain model.
//!
//! # Responsibility
//! - Define the canonical `Supplier` record and its summary projection.
//! - Own the single validated-construction path for suppliers.
//!
//! # Invariants
//! - A `Supplier` value is only ever produced by `Supplier::new`, so every
//!   field is present, trimmed and individually valid.
//! - Construction is atomic: the first invalid field aborts it.
//! - `SupplierSummary` is derived from a full `Supplier` and never persisted.

use crate::model::tax_id::{validate_tax_id, TaxIdError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

static PHONE_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("phone pattern is valid"));
static CITY_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L} \-]+$").expect("city pattern is valid"));

/// Repository-assigned supplier identifier. Always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SupplierId(i64);

impl SupplierId {
    /// Conventional id for candidates that have not been stored yet.
    ///
    /// Repositories overwrite it on `add`.
    pub const PLACEHOLDER: SupplierId = SupplierId(1);

    /// Id assigned to the first supplier of an empty set.
    pub const FIRST: SupplierId = SupplierId(1);

    pub fn new(value: i64) -> Result<Self, SupplierValidationError> {
        if value < 1 {
            return Err(SupplierValidationError::NonPositiveId(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Returns the following id, or `None` when `i64` is exhausted.
    pub fn next(self) -> Option<SupplierId> {
        self.0.checked_add(1).map(SupplierId)
    }
}

impl Display for SupplierId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names of the eight supplier fields, as used in persisted mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplierField {
    Id,
    Name,
    ContactName,
    Phone,
    Email,
    City,
    Address,
    TaxId,
}

impl SupplierField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::ContactName => "contact_name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::City => "city",
            Self::Address => "address",
            Self::TaxId => "tax_id",
        }
    }
}

impl Display for SupplierField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failure raised while constructing a `Supplier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplierValidationError {
    NonPositiveId(i64),
    EmptyName,
    EmptyContactName,
    InvalidPhone(String),
    InvalidEmail(String),
    InvalidCity(String),
    EmptyAddress,
    InvalidTaxId { value: String, reason: TaxIdError },
}

impl SupplierValidationError {
    /// Returns the field that failed validation.
    pub fn field(&self) -> SupplierField {
        match self {
            Self::NonPositiveId(_) => SupplierField::Id,
            Self::EmptyName => SupplierField::Name,
            Self::EmptyContactName => SupplierField::ContactName,
            Self::InvalidPhone(_) => SupplierField::Phone,
            Self::InvalidEmail(_) => SupplierField::Email,
            Self::InvalidCity(_) => SupplierField::City,
            Self::EmptyAddress => SupplierField::Address,
            Self::InvalidTaxId { .. } => SupplierField::TaxId,
        }
    }
}

impl Display for SupplierValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = self.field();
        match self {
            Self::NonPositiveId(value) => {
                write!(f, "invalid `{field}`: must be a positive integer, got {value}")
            }
            Self::EmptyName | Self::EmptyContactName | Self::EmptyAddress => {
                write!(f, "invalid `{field}`: must not be empty")
            }
            Self::InvalidPhone(value) => write!(
                f,
                "invalid `{field}` `{value}`: expected {PHONE_MIN_DIGITS}-{PHONE_MAX_DIGITS} digits with optional leading `+`, spaces, `-` or parentheses"
            ),
            Self::InvalidEmail(value) => write!(
                f,
                "invalid `{field}` `{value}`: expected exactly one `@` and a dotted domain"
            ),
            Self::InvalidCity(value) => write!(
                f,
                "invalid `{field}` `{value}`: only letters, spaces and hyphens are allowed"
            ),
            Self::InvalidTaxId { value, reason } => {
                write!(f, "invalid `{field}` `{value}`: {reason}")
            }
        }
    }
}

impl Error for SupplierValidationError {}

/// Unvalidated structured input, and the flat shape used by file backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: i64,
    pub name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub address: String,
    pub tax_id: String,
}

/// Canonical, validated supplier entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SupplierRecord", try_from = "SupplierRecord")]
pub struct Supplier {
    id: SupplierId,
    name: String,
    contact_name: String,
    phone: String,
    email: String,
    city: String,
    address: String,
    tax_id: String,
}

impl Supplier {
    /// Validates `record` and builds a supplier from its trimmed values.
    ///
    /// # Errors
    /// - Returns the first failing field, checked in record order.
    pub fn new(record: SupplierRecord) -> Result<Self, SupplierValidationError> {
        let id = SupplierId::new(record.id)?;
        let name = non_empty(record.name, SupplierValidationError::EmptyName)?;
        let contact_name = non_empty(record.contact_name, SupplierValidationError::EmptyContactName)?;
        let phone = validate_phone(record.phone)?;
        let email = validate_email(record.email)?;
        let city = validate_city(record.city)?;
        let address = non_empty(record.address, SupplierValidationError::EmptyAddress)?;
        let tax_id = trimmed(record.tax_id);
        if let Err(reason) = validate_tax_id(&tax_id) {
            return Err(SupplierValidationError::InvalidTaxId {
                value: tax_id,
                reason,
            });
        }

        Ok(Self {
            id,
            name,
            contact_name,
            phone,
            email,
            city,
            address,
            tax_id,
        })
    }

    /// Returns the same supplier under a different id.
    ///
    /// Used by repositories to stamp the authoritative id on a candidate.
    pub fn with_id(mut self, id: SupplierId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> SupplierId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    /// Returns an owned copy of the fields in persisted shape.
    pub fn to_record(&self) -> SupplierRecord {
        SupplierRecord::from(self.clone())
    }

    pub fn summary(&self) -> SupplierSummary {
        SupplierSummary::from(self)
    }
}

impl TryFrom<SupplierRecord> for Supplier {
    type Error = SupplierValidationError;

    fn try_from(value: SupplierRecord) -> Result<Self, Self::Error> {
        Supplier::new(value)
    }
}

impl From<Supplier> for SupplierRecord {
    fn from(value: Supplier) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            contact_name: value.contact_name,
            phone: value.phone,
            email: value.email,
            city: value.city,
            address: value.address,
            tax_id: value.tax_id,
        }
    }
}

impl Display for Supplier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} ({}, {}); contact: {}, {}, {}; tax id {}",
            self.id,
            self.name,
            self.city,
            self.address,
            self.contact_name,
            self.phone,
            self.email,
            self.tax_id
        )
    }
}

/// Read-only listing view of a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierSummary {
    id: SupplierId,
    name: String,
    phone: String,
    email: String,
    tax_id: String,
}

impl SupplierSummary {
    pub fn id(&self) -> SupplierId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }
}

impl From<&Supplier> for SupplierSummary {
    fn from(value: &Supplier) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            phone: value.phone.clone(),
            email: value.email.clone(),
            tax_id: value.tax_id.clone(),
        }
    }
}

impl Display for SupplierSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {}; {}, {}; tax id {}",
            self.id, self.name, self.phone, self.email, self.tax_id
        )
    }
}

fn trimmed(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

fn non_empty(
    value: String,
    error: SupplierValidationError,
) -> Result<String, SupplierValidationError> {
    let value = trimmed(value);
    if value.is_empty() {
        return Err(error);
    }
    Ok(value)
}

fn validate_phone(value: String) -> Result<String, SupplierValidationError> {
    let value = trimmed(value);
    let digit_count = value.chars().filter(char::is_ascii_digit).count();
    if !PHONE_CHARSET.is_match(&value)
        || !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digit_count)
    {
        return Err(SupplierValidationError::InvalidPhone(value));
    }
    Ok(value)
}

fn validate_email(value: String) -> Result<String, SupplierValidationError> {
    let value = trimmed(value);
    if !is_valid_email(&value) {
        return Err(SupplierValidationError::InvalidEmail(value));
    }
    Ok(value)
}

fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

fn validate_city(value: String) -> Result<String, SupplierValidationError> {
    let value = trimmed(value);
    if !CITY_CHARSET.is_match(&value) || !value.chars().any(char::is_alphabetic) {
        return Err(SupplierValidationError::InvalidCity(value));
    }
    Ok(value)
}
