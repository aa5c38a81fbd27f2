//! Derived CRUD over bulk read/write storage primitives.
//!
//! # Responsibility
//! - Define `SupplierStore`, the two primitives a snapshot backend supplies.
//! - Implement every `SupplierRepository` operation once, on top of them.
//!
//! # Invariants
//! - Each operation reads the full set, computes in memory and writes the
//!   full set back at most once.
//! - New ids are `max(existing) + 1`, or `1` for an empty set.
//! - No write happens on uniqueness failure, missing id or no-op delete.
//! - Callers must serialize writers: two concurrent `add`s may both read the
//!   same state and assign the same id.

use crate::model::supplier::{Supplier, SupplierId, SupplierSummary};
use crate::repo::supplier_repo::{PageRequest, RepoError, RepoResult, SupplierRepository};
use crate::repo::uniqueness::check_uniqueness;
use log::{debug, info, warn};

/// Bulk persistence primitives of a snapshot-style backend.
pub trait SupplierStore {
    /// Returns every persisted supplier in stored order.
    fn read_all(&self) -> RepoResult<Vec<Supplier>>;

    /// Replaces the persisted set with exactly `suppliers`, in order.
    fn write_all(&self, suppliers: &[Supplier]) -> RepoResult<()>;
}

/// Repository implemented purely through a `SupplierStore`.
#[derive(Debug, Clone)]
pub struct StoreRepository<S> {
    store: S,
}

impl<S: SupplierStore> StoreRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns every supplier in stored order.
    pub fn read_all(&self) -> RepoResult<Vec<Supplier>> {
        self.store.read_all()
    }
}

impl<S: SupplierStore> SupplierRepository for StoreRepository<S> {
    fn get_by_id(&self, id: SupplierId) -> RepoResult<Option<Supplier>> {
        Ok(self
            .store
            .read_all()?
            .into_iter()
            .find(|supplier| supplier.id() == id))
    }

    fn get_page(&self, size: u32, number: u32) -> RepoResult<Vec<SupplierSummary>> {
        let page = PageRequest::new(size, number)?;
        let suppliers = self.store.read_all()?;
        Ok(page
            .window(&suppliers)
            .iter()
            .map(SupplierSummary::from)
            .collect())
    }

    fn sort_by_city(&self) -> RepoResult<Vec<Supplier>> {
        let mut suppliers = self.store.read_all()?;
        suppliers.sort_by(|left, right| left.city().cmp(right.city()));
        Ok(suppliers)
    }

    fn add(&mut self, candidate: Supplier) -> RepoResult<Supplier> {
        let mut suppliers = self.store.read_all()?;
        if let Err(violation) = check_uniqueness(&candidate, &suppliers, None) {
            warn!(
                "event=supplier_add module=repo status=conflict conflicting_id={} fields={:?}",
                violation.conflicting_id, violation.fields
            );
            return Err(violation.into());
        }

        let id = next_id(&suppliers)?;
        let stored = candidate.with_id(id);
        suppliers.push(stored.clone());
        self.store.write_all(&suppliers)?;

        info!(
            "event=supplier_add module=repo status=ok id={} total={}",
            id,
            suppliers.len()
        );
        Ok(stored)
    }

    fn replace_by_id(&mut self, id: SupplierId, candidate: Supplier) -> RepoResult<bool> {
        let mut suppliers = self.store.read_all()?;
        let Some(position) = suppliers.iter().position(|supplier| supplier.id() == id) else {
            debug!("event=supplier_replace module=repo status=not_found id={}", id);
            return Ok(false);
        };

        if let Err(violation) = check_uniqueness(&candidate, &suppliers, Some(id)) {
            warn!(
                "event=supplier_replace module=repo status=conflict id={} conflicting_id={} fields={:?}",
                id, violation.conflicting_id, violation.fields
            );
            return Err(violation.into());
        }

        suppliers[position] = candidate.with_id(id);
        self.store.write_all(&suppliers)?;

        info!("event=supplier_replace module=repo status=ok id={}", id);
        Ok(true)
    }

    fn delete_by_id(&mut self, id: SupplierId) -> RepoResult<bool> {
        let mut suppliers = self.store.read_all()?;
        let before = suppliers.len();
        suppliers.retain(|supplier| supplier.id() != id);
        if suppliers.len() == before {
            debug!("event=supplier_delete module=repo status=not_found id={}", id);
            return Ok(false);
        }

        self.store.write_all(&suppliers)?;
        info!(
            "event=supplier_delete module=repo status=ok id={} total={}",
            id,
            suppliers.len()
        );
        Ok(true)
    }

    fn count(&self) -> RepoResult<usize> {
        Ok(self.store.read_all()?.len())
    }
}

fn next_id(suppliers: &[Supplier]) -> RepoResult<SupplierId> {
    match suppliers.iter().map(Supplier::id).max() {
        Some(max) => max.next().ok_or(RepoError::IdSpaceExhausted),
        None => Ok(SupplierId::FIRST),
    }
}
