//! Supplier use-case service.
//!
//! # Responsibility
//! - Accept raw caller input, validate it into suppliers and delegate
//!   persistence to a repository implementation.
//!
//! # Invariants
//! - Service APIs never bypass repository uniqueness/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::supplier::{
    Supplier, SupplierId, SupplierRecord, SupplierSummary, SupplierValidationError,
};
use crate::repo::supplier_repo::{RepoError, SupplierRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for supplier use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input does not form a valid supplier.
    Validation(SupplierValidationError),
    /// Persistence-layer failure, including uniqueness violations.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<SupplierValidationError> for ServiceError {
    fn from(value: SupplierValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case wrapper around a supplier repository.
pub struct SupplierService<R: SupplierRepository> {
    repo: R,
}

impl<R: SupplierRepository> SupplierService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Validates `record` and stores it under a repository-assigned id.
    ///
    /// The `id` in `record` only needs to be a valid placeholder.
    pub fn register(&mut self, record: SupplierRecord) -> ServiceResult<Supplier> {
        let candidate = Supplier::new(record)?;
        Ok(self.repo.add(candidate)?)
    }

    /// Validates `record` and replaces the supplier stored under `id`.
    ///
    /// # Contract
    /// - Returns `Ok(false)` when `id` does not exist.
    /// - The stored supplier keeps `id` regardless of `record.id`.
    pub fn update(&mut self, id: SupplierId, record: SupplierRecord) -> ServiceResult<bool> {
        let candidate = Supplier::new(record)?;
        Ok(self.repo.replace_by_id(id, candidate)?)
    }

    pub fn find(&self, id: SupplierId) -> ServiceResult<Option<Supplier>> {
        Ok(self.repo.get_by_id(id)?)
    }

    pub fn page(&self, size: u32, number: u32) -> ServiceResult<Vec<SupplierSummary>> {
        Ok(self.repo.get_page(size, number)?)
    }

    pub fn by_city(&self) -> ServiceResult<Vec<Supplier>> {
        Ok(self.repo.sort_by_city()?)
    }

    pub fn remove(&mut self, id: SupplierId) -> ServiceResult<bool> {
        Ok(self.repo.delete_by_id(id)?)
    }

    pub fn count(&self) -> ServiceResult<usize> {
        Ok(self.repo.count()?)
    }
}
