#![allow(dead_code)]

use std::path::Path;
use supplier_core::db::open_db;
use supplier_core::{
    JsonFileStore, RepoError, RepoResult, SqliteSupplierRepository, StoreRepository, Supplier,
    SupplierId, SupplierRecord, SupplierRepository, SupplierSummary, UniquenessViolation,
    YamlFileStore,
};

/// Checksum-valid tax ids, all distinct.
pub const TAX_IDS: [&str; 10] = [
    "7707083893",
    "7736050003",
    "7702070139",
    "7710140679",
    "7728168971",
    "500100732259",
    "7712345671",
    "5401234566",
    "1660000016",
    "2901112225",
];

pub fn record(
    name: &str,
    phone: &str,
    email: &str,
    city: &str,
    tax_id: &str,
) -> SupplierRecord {
    SupplierRecord {
        id: SupplierId::PLACEHOLDER.get(),
        name: name.to_string(),
        contact_name: "Ivan Petrov".to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        city: city.to_string(),
        address: "Lenina st. 1".to_string(),
        tax_id: tax_id.to_string(),
    }
}

pub fn supplier(name: &str, phone: &str, email: &str, city: &str, tax_id: &str) -> Supplier {
    Supplier::new(record(name, phone, email, city, tax_id)).unwrap()
}

/// A supplier whose identifying fields differ from every other `index`.
pub fn numbered(index: usize, city: &str) -> Supplier {
    supplier(
        &format!("Supplier {index}"),
        &format!("+7 900 000-00-{index:02}"),
        &format!("s{index}@supply.ru"),
        city,
        TAX_IDS[index],
    )
}

/// Runs `check` against a fresh JSON, YAML and SQLite repository under `dir`.
pub fn for_each_backend(dir: &Path, check: impl Fn(&str, &mut dyn SupplierRepository)) {
    let mut json = StoreRepository::new(JsonFileStore::new(dir.join("suppliers.json")));
    check("json", &mut json);

    let mut yaml =
        StoreRepository::new(YamlFileStore::try_new(dir.join("suppliers.yaml")).unwrap());
    check("yaml", &mut yaml);

    let mut conn = open_db(dir.join("suppliers.db")).unwrap();
    let mut sqlite = SqliteSupplierRepository::try_new(&mut conn).unwrap();
    check("sqlite", &mut sqlite);
}

pub fn expect_conflict<T: std::fmt::Debug>(result: RepoResult<T>) -> UniquenessViolation {
    match result {
        Err(RepoError::Uniqueness(violation)) => violation,
        other => panic!("expected uniqueness violation, got {other:?}"),
    }
}

pub fn ids<'a>(suppliers: impl IntoIterator<Item = &'a Supplier>) -> Vec<i64> {
    suppliers.into_iter().map(|supplier| supplier.id().get()).collect()
}

pub fn summary_ids(summaries: &[SupplierSummary]) -> Vec<i64> {
    summaries.iter().map(|summary| summary.id().get()).collect()
}
