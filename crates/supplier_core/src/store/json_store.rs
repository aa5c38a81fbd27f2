//! JSON document store: one array of flat supplier objects.

use super::{load_records, write_atomically, StoreError};
use crate::model::supplier::{Supplier, SupplierRecord};
use crate::repo::store_repo::SupplierStore;
use crate::repo::supplier_repo::RepoResult;
use std::path::{Path, PathBuf};

/// Supplier set persisted as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// The file does not have to exist; it is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SupplierStore for JsonFileStore {
    fn read_all(&self) -> RepoResult<Vec<Supplier>> {
        load_records(
            &self.path,
            "json",
            |bytes| serde_json::from_slice::<Vec<serde_json::Value>>(bytes),
            serde_json::from_value::<SupplierRecord>,
        )
    }

    fn write_all(&self, suppliers: &[Supplier]) -> RepoResult<()> {
        let mut bytes = serde_json::to_vec_pretty(suppliers).map_err(StoreError::from)?;
        bytes.push(b'\n');
        write_atomically(&self.path, &bytes)?;
        Ok(())
    }
}
