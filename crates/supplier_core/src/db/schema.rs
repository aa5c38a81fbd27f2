//! Supplier table bootstrap.
//!
//! # Responsibility
//! - Create the `suppliers` table on a fresh database.
//! - Refuse databases stamped by a newer build.
//!
//! # Invariants
//! - There is exactly one schema; `PRAGMA user_version` is `0` before it is
//!   created and `SCHEMA_VERSION` after.
//! - Creation and stamping happen in one transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Version stamped on databases that carry the supplier table.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the supplier table unless `conn` already carries it.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the database is stamped with
///   any other non-zero version.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    match current_user_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(SCHEMA_SQL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            info!("event=db_schema module=db status=created version={SCHEMA_VERSION}");
            Ok(())
        }
        db_version => Err(DbError::UnsupportedSchemaVersion {
            db_version,
            supported: SCHEMA_VERSION,
        }),
    }
}

/// Reads the schema version recorded on `conn`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
