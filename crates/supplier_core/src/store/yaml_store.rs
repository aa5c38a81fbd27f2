//! YAML document store: one block sequence of flat supplier mappings.

use super::{load_records, write_atomically, StoreError};
use crate::model::supplier::{Supplier, SupplierRecord};
use crate::repo::store_repo::SupplierStore;
use crate::repo::supplier_repo::RepoResult;
use std::path::{Path, PathBuf};

const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Supplier set persisted as a YAML sequence.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    /// # Errors
    /// - `StoreError::UnsupportedExtension` unless the path ends in
    ///   `.yaml` or `.yml`.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if !supported {
            return Err(StoreError::UnsupportedExtension(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SupplierStore for YamlFileStore {
    fn read_all(&self) -> RepoResult<Vec<Supplier>> {
        load_records(
            &self.path,
            "yaml",
            |bytes| {
                serde_yaml::from_slice::<Option<Vec<serde_yaml::Value>>>(bytes)
                    .map(Option::unwrap_or_default)
            },
            serde_yaml::from_value::<SupplierRecord>,
        )
    }

    fn write_all(&self, suppliers: &[Supplier]) -> RepoResult<()> {
        let text = serde_yaml::to_string(suppliers).map_err(StoreError::from)?;
        write_atomically(&self.path, text.as_bytes())?;
        Ok(())
    }
}
