//! SQLite connections for the supplier database.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Create the supplier table on first open.
//! - Register the SQL functions the supplier queries rely on.
//!
//! # Invariants
//! - Handed-out connections carry the supplier table at `SCHEMA_VERSION`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod functions;
pub mod schema;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                supported,
            } => write!(
                f,
                "database schema version {db_version} is not supported (expected {supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
