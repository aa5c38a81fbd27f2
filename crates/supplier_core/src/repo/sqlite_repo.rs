//! Supplier repository over SQLite.
//!
//! # Responsibility
//! - Map each repository operation to direct parametrized SQL.
//! - Reproduce the in-process uniqueness semantics with a query prefilter.
//!
//! # Invariants
//! - Natural read order is `supplier_id ASC`.
//! - Ids are assigned by SQLite on insert (`max(rowid) + 1`).
//! - Uniqueness check and write share one `IMMEDIATE` transaction.
//! - Rows are validated on read; invalid rows surface as `InvalidData`.

use crate::db::functions::register_functions;
use crate::db::schema::{current_user_version, SCHEMA_VERSION};
use crate::model::supplier::{Supplier, SupplierId, SupplierRecord, SupplierSummary};
use crate::repo::supplier_repo::{PageRequest, RepoError, RepoResult, SupplierRepository};
use crate::repo::uniqueness::{find_conflict, NormalizedKeys};
use log::{debug, info, warn};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::collections::HashSet;

const SUPPLIERS_TABLE: &str = "suppliers";
const REQUIRED_COLUMNS: &[&str] = &[
    "supplier_id",
    "name",
    "contact_name",
    "phone",
    "email",
    "city",
    "address",
    "tax_id",
];

const SUPPLIER_SELECT_SQL: &str = "SELECT
    supplier_id,
    name,
    contact_name,
    phone,
    email,
    city,
    address,
    tax_id
FROM suppliers";

// One OR-ed prefilter over all identifying fields. Blank candidate values
// bind as NULL and disable their predicate.
const CONFLICT_CANDIDATES_SQL: &str = "SELECT supplier_id, name, phone, email, tax_id
FROM suppliers
WHERE (
        (?1 IS NOT NULL AND supplier_fold_text(name) = ?1)
     OR (?2 IS NOT NULL AND supplier_digits(phone) = ?2)
     OR (?3 IS NOT NULL AND supplier_fold_text(email) = ?3)
     OR (?4 IS NOT NULL AND supplier_tax_id(tax_id) = ?4)
  )
  AND (?5 IS NULL OR supplier_id <> ?5)
ORDER BY supplier_id ASC;";

/// SQLite-backed supplier repository.
#[derive(Debug)]
pub struct SqliteSupplierRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteSupplierRepository<'conn> {
    /// Constructs a repository from a connection opened through `open_db`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema is
    ///   not the one this build expects.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        register_functions(conn)?;
        Ok(Self { conn })
    }
}

impl SupplierRepository for SqliteSupplierRepository<'_> {
    fn get_by_id(&self, id: SupplierId) -> RepoResult<Option<Supplier>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUPPLIER_SELECT_SQL} WHERE supplier_id = ?1;"))?;
        let mut rows = stmt.query([id.get()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_supplier_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_page(&self, size: u32, number: u32) -> RepoResult<Vec<SupplierSummary>> {
        let page = PageRequest::new(size, number)?;
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let suppliers = self.query_suppliers(
            &format!("{SUPPLIER_SELECT_SQL} ORDER BY supplier_id ASC LIMIT ?1 OFFSET ?2;"),
            params![i64::from(page.size()), offset],
        )?;
        Ok(suppliers.iter().map(SupplierSummary::from).collect())
    }

    fn sort_by_city(&self) -> RepoResult<Vec<Supplier>> {
        self.query_suppliers(
            &format!("{SUPPLIER_SELECT_SQL} ORDER BY city ASC, supplier_id ASC;"),
            [],
        )
    }

    fn add(&mut self, candidate: Supplier) -> RepoResult<Supplier> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_unique(&tx, &candidate, None)?;

        let raw_id: i64 = tx.query_row(
            "INSERT INTO suppliers (
                name,
                contact_name,
                phone,
                email,
                city,
                address,
                tax_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING supplier_id;",
            params![
                candidate.name(),
                candidate.contact_name(),
                candidate.phone(),
                candidate.email(),
                candidate.city(),
                candidate.address(),
                candidate.tax_id(),
            ],
            |row| row.get(0),
        )?;
        let id = SupplierId::new(raw_id)
            .map_err(|err| RepoError::InvalidData(format!("inserted supplier id: {err}")))?;
        tx.commit()?;

        info!(
            "event=supplier_add module=repo backend=sqlite status=ok id={}",
            id
        );
        Ok(candidate.with_id(id))
    }

    fn replace_by_id(&mut self, id: SupplierId, candidate: Supplier) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE supplier_id = ?1);",
            [id.get()],
            |row| row.get(0),
        )?;
        if !exists {
            debug!(
                "event=supplier_replace module=repo backend=sqlite status=not_found id={}",
                id
            );
            return Ok(false);
        }

        ensure_unique(&tx, &candidate, Some(id))?;
        tx.execute(
            "UPDATE suppliers
             SET
                name = ?1,
                contact_name = ?2,
                phone = ?3,
                email = ?4,
                city = ?5,
                address = ?6,
                tax_id = ?7
             WHERE supplier_id = ?8;",
            params![
                candidate.name(),
                candidate.contact_name(),
                candidate.phone(),
                candidate.email(),
                candidate.city(),
                candidate.address(),
                candidate.tax_id(),
                id.get(),
            ],
        )?;
        tx.commit()?;

        info!(
            "event=supplier_replace module=repo backend=sqlite status=ok id={}",
            id
        );
        Ok(true)
    }

    fn delete_by_id(&mut self, id: SupplierId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM suppliers WHERE supplier_id = ?1;", [id.get()])?;
        if changed == 0 {
            debug!(
                "event=supplier_delete module=repo backend=sqlite status=not_found id={}",
                id
            );
            return Ok(false);
        }

        info!(
            "event=supplier_delete module=repo backend=sqlite status=ok id={}",
            id
        );
        Ok(true)
    }

    fn count(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM suppliers;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("invalid supplier count `{count}`")))
    }
}

impl SqliteSupplierRepository<'_> {
    fn query_suppliers(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Supplier>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut suppliers = Vec::new();
        while let Some(row) = rows.next()? {
            suppliers.push(parse_supplier_row(row)?);
        }
        Ok(suppliers)
    }
}

/// Runs the prefilter query, then confirms matches with the in-process rules.
fn ensure_unique(
    conn: &Connection,
    candidate: &Supplier,
    exclude_id: Option<SupplierId>,
) -> RepoResult<()> {
    let keys = NormalizedKeys::of(candidate);
    if keys.is_empty() {
        return Ok(());
    }

    let mut stmt = conn.prepare(CONFLICT_CANDIDATES_SQL)?;
    let mut rows = stmt.query(params![
        keys.name.as_deref(),
        keys.phone.as_deref(),
        keys.email.as_deref(),
        keys.tax_id.as_deref(),
        exclude_id.map(SupplierId::get),
    ])?;

    let mut existing = Vec::new();
    while let Some(row) = rows.next()? {
        let raw_id: i64 = row.get("supplier_id")?;
        let id = SupplierId::new(raw_id)
            .map_err(|err| RepoError::InvalidData(format!("suppliers row: {err}")))?;
        let name: String = row.get("name")?;
        let phone: String = row.get("phone")?;
        let email: String = row.get("email")?;
        let tax_id: String = row.get("tax_id")?;
        existing.push((id, NormalizedKeys::from_raw(&name, &phone, &email, &tax_id)));
    }

    match find_conflict(&keys, existing, exclude_id) {
        Some(violation) => {
            warn!(
                "event=supplier_uniqueness module=repo backend=sqlite status=conflict conflicting_id={} fields={:?}",
                violation.conflicting_id, violation.fields
            );
            Err(violation.into())
        }
        None => Ok(()),
    }
}

fn parse_supplier_row(row: &Row<'_>) -> RepoResult<Supplier> {
    let record = SupplierRecord {
        id: row.get("supplier_id")?,
        name: row.get("name")?,
        contact_name: row.get("contact_name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        city: row.get("city")?,
        address: row.get("address")?,
        tax_id: row.get("tax_id")?,
    };
    let id = record.id;
    Supplier::new(record)
        .map_err(|err| RepoError::InvalidData(format!("suppliers row {id}: {err}")))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = SCHEMA_VERSION;
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [SUPPLIERS_TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(SUPPLIERS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([SUPPLIERS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|column| !columns.contains(*column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: SUPPLIERS_TABLE,
            column,
        });
    }

    Ok(())
}
