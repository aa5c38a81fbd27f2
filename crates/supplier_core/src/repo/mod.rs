//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the backend-agnostic supplier repository contract.
//! - Implement derived CRUD once over bulk storage primitives.
//! - Keep SQL details inside the SQLite adapter.
//!
//! # Invariants
//! - Every backend enforces the same uniqueness guard before writing.
//! - "Not found" on replace/delete is a `false` result, not an error.

pub mod sqlite_repo;
pub mod store_repo;
pub mod supplier_repo;
pub mod uniqueness;

use crate::store::{JsonFileStore, YamlFileStore};
use store_repo::StoreRepository;

/// Repository persisted as a JSON array file.
pub type JsonSupplierRepository = StoreRepository<JsonFileStore>;

/// Repository persisted as a YAML sequence file.
pub type YamlSupplierRepository = StoreRepository<YamlFileStore>;
