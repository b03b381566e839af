// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use controlmoney::models::{NewAccount, NewRecord};
use controlmoney::{LedgerStore, StoreError, StoreLocation};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn new_book(name: &str) -> NewAccount {
    NewAccount {
        name: name.into(),
        currency: "USD".into(),
    }
}

fn new_rec(book_id: i64, amount: i64) -> NewRecord {
    NewRecord {
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        description: None,
        amount: Decimal::from(amount),
        book_id,
    }
}

#[test]
fn store_opens_lazily() {
    let store = LedgerStore::in_memory();
    assert!(!store.is_open());
    store.initialize().unwrap();
    assert!(store.is_open());
}

#[test]
fn initialize_is_idempotent() {
    let store = LedgerStore::in_memory();
    store.initialize().unwrap();
    let book = store.create_account(&new_book("Travel")).unwrap();
    store.create_record(&new_rec(book, 3)).unwrap();

    for _ in 0..3 {
        store.initialize().unwrap();
    }
    assert_eq!(store.list_accounts().unwrap().len(), 1);
    assert_eq!(store.record_count(None).unwrap(), 1);
    assert_eq!(store.record_sum(Some(book)).unwrap(), Decimal::from(3));
}

#[test]
fn operations_before_initialize_fail_with_storage_error() {
    let store = LedgerStore::in_memory();
    let err = store.list_accounts().unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)), "{err:?}");
}

#[test]
fn close_without_open_is_noop() {
    let store = LedgerStore::in_memory();
    store.close().unwrap();
    store.close().unwrap();
    assert!(!store.is_open());
}

#[test]
fn file_store_survives_close_and_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("ledger.sqlite");
    let store = LedgerStore::new(StoreLocation::file(&path));
    store.initialize().unwrap();
    let book = store.create_account(&new_book("Travel")).unwrap();
    store.create_record(&new_rec(book, -450)).unwrap();

    store.close().unwrap();
    assert!(!store.is_open());
    assert!(path.exists());

    let acct = store.get_account(book).unwrap().unwrap();
    assert!(store.is_open());
    assert_eq!(acct.name, "Travel");
    assert_eq!(store.record_sum(Some(book)).unwrap(), Decimal::from(-450));
}

#[test]
fn foreign_keys_enforced_after_reopen() {
    let dir = tempdir().unwrap();
    let store = LedgerStore::new(StoreLocation::file(dir.path().join("ledger.sqlite")));
    store.initialize().unwrap();
    store.close().unwrap();

    let err = store.create_record(&new_rec(12, 1)).unwrap_err();
    assert!(err.is_constraint_violation(), "{err:?}");
}

#[test]
fn second_store_on_same_file_sees_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    {
        let store = LedgerStore::new(StoreLocation::file(&path));
        store.initialize().unwrap();
        store.create_account(&new_book("Home")).unwrap();
        store.close().unwrap();
    }
    let store = LedgerStore::new(StoreLocation::file(&path));
    store.initialize().unwrap();
    let names: Vec<String> = store
        .list_accounts()
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, ["Home"]);
}

#[test]
fn closing_memory_store_discards_data() {
    let store = LedgerStore::in_memory();
    store.initialize().unwrap();
    store.create_account(&new_book("Gone")).unwrap();
    store.close().unwrap();

    store.initialize().unwrap();
    assert!(store.list_accounts().unwrap().is_empty());
}

#[test]
fn concurrent_first_use_shares_one_connection() {
    // Each in-memory connection is its own database, so a second open would lose rows.
    let store = LedgerStore::in_memory();
    std::thread::scope(|s| {
        for i in 0..8 {
            let store = &store;
            s.spawn(move || {
                store.initialize().unwrap();
                store.create_account(&new_book(&format!("T{}", i))).unwrap();
            });
        }
    });
    assert_eq!(store.list_accounts().unwrap().len(), 8);
    let mut ids: Vec<i64> = store.list_accounts().unwrap().iter().map(|a| a.id).collect();
    ids.sort();
    assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
}

#[test]
fn cascade_delete_removes_every_record() {
    let store = LedgerStore::in_memory();
    store.initialize().unwrap();
    for n in [0, 1, 25] {
        let book = store.create_account(&new_book(&format!("N{}", n))).unwrap();
        for i in 0..n {
            store.create_record(&new_rec(book, i)).unwrap();
        }
        store.delete_account(book).unwrap();
        assert!(store.get_account(book).unwrap().is_none());
        assert_eq!(store.record_count(Some(book)).unwrap(), 0);
    }
    assert_eq!(store.record_count(None).unwrap(), 0);
}

#[test]
fn location_display() {
    assert_eq!(LedgerStore::in_memory().location().to_string(), ":memory:");
    let store = LedgerStore::new(StoreLocation::file("/tmp/x.sqlite"));
    assert_eq!(store.location(), &StoreLocation::File("/tmp/x.sqlite".into()));
}

#[test]
fn failed_book_delete_leaves_book_and_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    let store = LedgerStore::new(StoreLocation::file(&path));
    store.initialize().unwrap();
    let book = store.create_account(&new_book("Locked")).unwrap();
    store.create_record(&new_rec(book, 10)).unwrap();
    store.create_record(&new_rec(book, 20)).unwrap();
    store.close().unwrap();

    // Let the record delete run, then make the book delete fail.
    let other = rusqlite::Connection::open(&path).unwrap();
    other
        .execute_batch(
            "CREATE TRIGGER keep_accounts BEFORE DELETE ON accounts
             BEGIN SELECT RAISE(ABORT, 'accounts are locked'); END;",
        )
        .unwrap();
    drop(other);

    assert!(store.delete_account(book).is_err());
    assert!(store.get_account(book).unwrap().is_some());
    assert_eq!(store.record_count(Some(book)).unwrap(), 2);
    assert_eq!(store.record_sum(Some(book)).unwrap(), Decimal::from(30));
}

#[test]
fn storage_error_keeps_sqlite_message_as_source() {
    use std::error::Error;

    let store = LedgerStore::in_memory();
    let err = store.list_accounts().unwrap_err();
    assert_eq!(err.to_string(), "storage failure");
    let source = err.source().unwrap().to_string();
    assert!(source.contains("no such table"), "{source}");
}
