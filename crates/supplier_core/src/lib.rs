//! Core domain logic for supplier records.
//! This crate is the single source of truth for supplier validation,
//! uniqueness rules and the storage-agnostic repository contract.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{BackendKind, ConfigError, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingConfig};
pub use model::decode::{supplier_from_delimited, supplier_from_json, DecodeError};
pub use model::supplier::{
    Supplier, SupplierField, SupplierId, SupplierRecord, SupplierSummary, SupplierValidationError,
};
pub use repo::sqlite_repo::SqliteSupplierRepository;
pub use repo::store_repo::{StoreRepository, SupplierStore};
pub use repo::supplier_repo::{PageRequest, RepoError, RepoResult, SupplierRepository};
pub use repo::uniqueness::{check_uniqueness, UniquenessViolation};
pub use repo::{JsonSupplierRepository, YamlSupplierRepository};
pub use service::supplier_service::{ServiceError, ServiceResult, SupplierService};
pub use store::{JsonFileStore, StoreError, YamlFileStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
