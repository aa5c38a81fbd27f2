use rusqlite::Connection;
use supplier_core::db::schema::{current_user_version, ensure_schema, SCHEMA_VERSION};
use supplier_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_creates_supplier_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_user_version(&conn).unwrap(), SCHEMA_VERSION);
    assert_table_exists(&conn, "suppliers");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suppliers.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO suppliers (name, contact_name, phone, email, city, address, tax_id)
             VALUES ('Acme', 'Anna', '+7 495 123-45-67', 'sales@acme.ru', 'Moscow', 'Tverskaya 1', '7707083893');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let mut conn_second = open_db(&path).unwrap();
    ensure_schema(&mut conn_second).unwrap();
    assert_eq!(current_user_version(&conn_second).unwrap(), SCHEMA_VERSION);
    let rows: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM suppliers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn opening_database_with_other_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opened_connections_expose_normalizing_functions() {
    let conn = open_db_in_memory().unwrap();
    let call = |sql: &str| -> Option<String> {
        conn.query_row(sql, [], |row| row.get(0)).unwrap()
    };

    assert_eq!(
        call("SELECT supplier_fold_text('  ООО Ромашка ');").as_deref(),
        Some("ооо ромашка")
    );
    assert_eq!(
        call("SELECT supplier_fold_text('Straße');"),
        call("SELECT supplier_fold_text('STRASSE');")
    );
    assert_eq!(call("SELECT supplier_fold_text('   ');"), None);
    assert_eq!(
        call("SELECT supplier_digits('+7 (900) 555-66-77');").as_deref(),
        Some("79005556677")
    );
    assert_eq!(
        call("SELECT supplier_tax_id(char(9) || '7707083893' || char(10));").as_deref(),
        Some("7707083893")
    );
    assert_eq!(call("SELECT supplier_tax_id(' ');"), None);
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
