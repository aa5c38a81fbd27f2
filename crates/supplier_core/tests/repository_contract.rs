mod common;

use common::{
    expect_conflict, for_each_backend, ids, numbered, summary_ids, supplier, TAX_IDS,
};
use supplier_core::{RepoError, Supplier, SupplierField, SupplierId};

fn id(value: i64) -> SupplierId {
    SupplierId::new(value).unwrap()
}

#[test]
fn empty_repository_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        assert_eq!(repo.count().unwrap(), 0, "{backend}");
        assert!(repo.get_by_id(id(1)).unwrap().is_none(), "{backend}");
        assert!(repo.get_page(10, 1).unwrap().is_empty(), "{backend}");
        assert!(repo.sort_by_city().unwrap().is_empty(), "{backend}");
        assert!(!repo.delete_by_id(id(1)).unwrap(), "{backend}");
        assert!(
            !repo.replace_by_id(id(1), numbered(0, "Moscow")).unwrap(),
            "{backend}"
        );
        assert_eq!(repo.count().unwrap(), 0, "{backend}");
    });
}

#[test]
fn register_sort_page_and_delete_scenario() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        let moscow = repo.add(numbered(0, "Moscow")).unwrap();
        let kazan = repo.add(numbered(1, "Kazan")).unwrap();
        let tula = repo.add(numbered(2, "Tula")).unwrap();
        assert_eq!(repo.count().unwrap(), 3, "{backend}");

        let sorted = repo.sort_by_city().unwrap();
        let cities: Vec<&str> = sorted.iter().map(Supplier::city).collect();
        assert_eq!(cities, ["Kazan", "Moscow", "Tula"], "{backend}");

        let first_page = repo.get_page(2, 1).unwrap();
        assert_eq!(
            summary_ids(&first_page),
            vec![moscow.id().get(), kazan.id().get()],
            "{backend}"
        );

        assert!(repo.delete_by_id(kazan.id()).unwrap(), "{backend}");
        assert_eq!(repo.count().unwrap(), 2, "{backend}");
        assert!(repo.get_by_id(kazan.id()).unwrap().is_none(), "{backend}");
        assert_eq!(repo.get_by_id(tula.id()).unwrap(), Some(tula.clone()), "{backend}");
    });
}

#[test]
fn email_only_conflict_is_reported_and_nothing_is_written() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        let existing = repo.add(numbered(0, "Moscow")).unwrap();

        let candidate = supplier(
            "Completely Different LLC",
            "+7 911 111-11-11",
            "  S0@SUPPLY.RU ",
            "Tula",
            TAX_IDS[5],
        );
        let violation = expect_conflict(repo.add(candidate));
        assert_eq!(violation.fields, vec![SupplierField::Email], "{backend}");
        assert_eq!(violation.conflicting_id, existing.id(), "{backend}");
        assert_eq!(repo.count().unwrap(), 1, "{backend}");
    });
}

#[test]
fn name_conflict_uses_full_case_folding() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        let strasse = repo
            .add(supplier(
                "Straße GmbH",
                "+49 30 1234567",
                "info@strasse.de",
                "Berlin",
                TAX_IDS[0],
            ))
            .unwrap();
        let odos = repo
            .add(supplier(
                "ΟΔΟΣ",
                "+30 21 0123456",
                "info@odos.gr",
                "Athens",
                TAX_IDS[1],
            ))
            .unwrap();

        let violation = expect_conflict(repo.add(supplier(
            "STRASSE GMBH",
            "+49 89 7654321",
            "sales@strasse.com",
            "Munich",
            TAX_IDS[2],
        )));
        assert_eq!(violation.fields, vec![SupplierField::Name], "{backend}");
        assert_eq!(violation.conflicting_id, strasse.id(), "{backend}");

        let violation = expect_conflict(repo.add(supplier(
            "οδοσ",
            "+30 23 1098765",
            "sales@odos.com",
            "Patras",
            TAX_IDS[3],
        )));
        assert_eq!(violation.fields, vec![SupplierField::Name], "{backend}");
        assert_eq!(violation.conflicting_id, odos.id(), "{backend}");
        assert_eq!(repo.count().unwrap(), 2, "{backend}");
    });
}

#[test]
fn add_assigns_max_plus_one_ids() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        let first = repo.add(numbered(0, "Moscow")).unwrap();
        let second = repo.add(numbered(1, "Kazan")).unwrap();
        let third = repo.add(numbered(2, "Tula")).unwrap();
        assert_eq!(
            ids([&first, &second, &third]),
            vec![1, 2, 3],
            "{backend}"
        );

        assert!(repo.delete_by_id(third.id()).unwrap());
        assert_eq!(repo.add(numbered(3, "Omsk")).unwrap().id(), id(3), "{backend}");

        assert!(repo.delete_by_id(first.id()).unwrap());
        assert_eq!(repo.add(numbered(4, "Perm")).unwrap().id(), id(4), "{backend}");
    });
}

#[test]
fn add_ignores_candidate_id_and_returns_stored_supplier() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        let candidate = numbered(0, "Moscow").with_id(id(42));
        let stored = repo.add(candidate.clone()).unwrap();

        assert_eq!(stored.id(), id(1), "{backend}");
        assert_eq!(stored.with_id(id(42)), candidate, "{backend}");
        assert!(repo.get_by_id(id(42)).unwrap().is_none(), "{backend}");
    });
}

#[test]
fn replace_keeps_id_and_position() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        for (index, city) in ["Moscow", "Kazan", "Tula"].into_iter().enumerate() {
            repo.add(numbered(index, city)).unwrap();
        }

        assert!(repo.replace_by_id(id(2), numbered(5, "Omsk")).unwrap(), "{backend}");

        let replaced = repo.get_by_id(id(2)).unwrap().unwrap();
        assert_eq!(replaced.id(), id(2), "{backend}");
        assert_eq!(replaced.name(), "Supplier 5", "{backend}");
        assert_eq!(replaced.city(), "Omsk", "{backend}");
        assert_eq!(
            summary_ids(&repo.get_page(10, 1).unwrap()),
            vec![1, 2, 3],
            "{backend}"
        );
        assert_eq!(repo.count().unwrap(), 3, "{backend}");
    });
}

#[test]
fn replace_never_conflicts_with_the_record_being_replaced() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        repo.add(numbered(0, "Moscow")).unwrap();

        assert!(repo.replace_by_id(id(1), numbered(0, "Samara")).unwrap(), "{backend}");
        assert_eq!(
            repo.get_by_id(id(1)).unwrap().unwrap().city(),
            "Samara",
            "{backend}"
        );
    });
}

#[test]
fn replace_conflicting_with_another_record_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        repo.add(numbered(0, "Moscow")).unwrap();
        repo.add(numbered(1, "Kazan")).unwrap();

        let violation = expect_conflict(repo.replace_by_id(id(1), numbered(1, "Samara")));
        assert_eq!(
            violation.fields,
            vec![
                SupplierField::Name,
                SupplierField::Phone,
                SupplierField::Email,
                SupplierField::TaxId,
            ],
            "{backend}"
        );
        assert_eq!(violation.conflicting_id, id(2), "{backend}");
        assert_eq!(
            repo.get_by_id(id(1)).unwrap().unwrap().city(),
            "Moscow",
            "{backend}"
        );
    });
}

#[test]
fn replace_of_missing_id_is_false_even_for_conflicting_candidate() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        repo.add(numbered(0, "Moscow")).unwrap();

        assert!(!repo.replace_by_id(id(99), numbered(0, "Kazan")).unwrap(), "{backend}");
        assert_eq!(repo.count().unwrap(), 1, "{backend}");
        assert!(repo.get_by_id(id(99)).unwrap().is_none(), "{backend}");
    });
}

#[test]
fn delete_of_missing_id_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        repo.add(numbered(0, "Moscow")).unwrap();

        assert!(!repo.delete_by_id(id(7)).unwrap(), "{backend}");
        assert_eq!(repo.count().unwrap(), 1, "{backend}");
    });
}

#[test]
fn pages_are_windows_over_read_order() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        for index in 0..5 {
            repo.add(numbered(index, "Moscow")).unwrap();
        }

        let pages: Vec<Vec<i64>> = (1..=4)
            .map(|number| summary_ids(&repo.get_page(2, number).unwrap()))
            .collect();
        assert_eq!(
            pages,
            vec![vec![1, 2], vec![3, 4], vec![5], vec![]],
            "{backend}"
        );

        let third_page = repo.get_page(1, 3).unwrap();
        let summary = &third_page[0];
        assert_eq!(summary.name(), "Supplier 2", "{backend}");
        assert_eq!(summary.email(), "s2@supply.ru", "{backend}");
        assert_eq!(summary.tax_id(), TAX_IDS[2], "{backend}");
    });
}

#[test]
fn zero_page_size_or_number_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        assert!(
            matches!(
                repo.get_page(0, 1),
                Err(RepoError::InvalidPage { size: 0, number: 1 })
            ),
            "{backend}"
        );
        assert!(
            matches!(
                repo.get_page(5, 0),
                Err(RepoError::InvalidPage { size: 5, number: 0 })
            ),
            "{backend}"
        );
    });
}

#[test]
fn sort_by_city_is_stable_and_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    for_each_backend(dir.path(), |backend, repo| {
        for (index, city) in ["Tula", "Kazan", "Tula", "Kazan"].into_iter().enumerate() {
            repo.add(numbered(index, city)).unwrap();
        }

        let sorted = repo.sort_by_city().unwrap();
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3], "{backend}");
        assert_eq!(repo.sort_by_city().unwrap(), sorted, "{backend}");
        assert_eq!(
            summary_ids(&repo.get_page(10, 1).unwrap()),
            vec![1, 2, 3, 4],
            "{backend}"
        );
    });
}
