//! Supplier repository contract.
//!
//! # Responsibility
//! - Define the backend-agnostic CRUD surface every storage adapter exposes.
//! - Own the shared error type and pagination arithmetic.
//!
//! # Invariants
//! - `add` and `replace_by_id` never write when the uniqueness guard fires.
//! - Missing ids on `replace_by_id`/`delete_by_id` are `Ok(false)`, not errors.
//! - Paging never reorders: pages are windows over natural read order.

use crate::db::DbError;
use crate::model::supplier::{Supplier, SupplierId, SupplierSummary};
use crate::repo::uniqueness::UniquenessViolation;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by file and database backends.
#[derive(Debug)]
pub enum RepoError {
    /// Candidate shares identifying values with a stored supplier.
    Uniqueness(UniquenessViolation),
    /// Page size or page number is zero.
    InvalidPage { size: u32, number: u32 },
    /// No id greater than the current maximum is representable.
    IdSpaceExhausted,
    /// Persisted data cannot be turned into valid suppliers.
    InvalidData(String),
    Store(StoreError),
    Db(DbError),
    /// Connection does not carry the supplier schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniqueness(err) => write!(f, "{err}"),
            Self::InvalidPage { size, number } => write!(
                f,
                "page size and page number must be positive, got size={size} number={number}"
            ),
            Self::IdSpaceExhausted => write!(f, "no supplier id left to assign"),
            Self::InvalidData(message) => write!(f, "invalid persisted supplier data: {message}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "supplier repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "supplier repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "supplier repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Uniqueness(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidPage { .. }
            | Self::IdSpaceExhausted
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<UniquenessViolation> for RepoError {
    fn from(value: UniquenessViolation) -> Self {
        Self::Uniqueness(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Validated `(size, number)` pair for one-based page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    size: u32,
    number: u32,
}

impl PageRequest {
    /// # Errors
    /// - `RepoError::InvalidPage` when `size` or `number` is zero.
    pub fn new(size: u32, number: u32) -> RepoResult<Self> {
        if size == 0 || number == 0 {
            return Err(RepoError::InvalidPage { size, number });
        }
        Ok(Self { size, number })
    }

    pub fn size(self) -> u32 {
        self.size
    }

    pub fn number(self) -> u32 {
        self.number
    }

    /// Zero-based index of the first item on this page.
    pub fn offset(self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    /// Returns the window of `items` covered by this page; empty past the end.
    pub fn window<T>(self, items: &[T]) -> &[T] {
        let len = items.len() as u64;
        let start = self.offset().min(len);
        let end = start.saturating_add(u64::from(self.size)).min(len);
        // Both bounds are clamped to `items.len()`, so they fit in usize.
        &items[start as usize..end as usize]
    }
}

/// Backend-agnostic supplier repository.
///
/// Reads take `&self`; writes take `&mut self` because every backend assumes
/// a single writer at a time.
pub trait SupplierRepository {
    /// Returns the first supplier with `id`, if any.
    fn get_by_id(&self, id: SupplierId) -> RepoResult<Option<Supplier>>;

    /// Returns up to `size` summaries starting at `(number - 1) * size`.
    fn get_page(&self, size: u32, number: u32) -> RepoResult<Vec<SupplierSummary>>;

    /// Returns all suppliers ordered by city; ties keep read order.
    fn sort_by_city(&self) -> RepoResult<Vec<Supplier>>;

    /// Assigns a fresh id to `candidate`, persists it and returns the stored
    /// supplier.
    fn add(&mut self, candidate: Supplier) -> RepoResult<Supplier>;

    /// Replaces the supplier with `id` in place, keeping `id`.
    ///
    /// Returns `Ok(false)` without writing when `id` does not exist.
    fn replace_by_id(&mut self, id: SupplierId, candidate: Supplier) -> RepoResult<bool>;

    /// Removes the supplier with `id`; returns whether anything was removed.
    fn delete_by_id(&mut self, id: SupplierId) -> RepoResult<bool>;

    fn count(&self) -> RepoResult<usize>;
}
