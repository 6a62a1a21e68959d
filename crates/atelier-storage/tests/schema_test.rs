//! Migration runner.

use atelier_storage::migrations::{current_version, run_migrations, LATEST_VERSION};
use atelier_storage::StorageEngine;
use rusqlite::Connection;

#[test]
fn fresh_database_reaches_latest_version() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(current_version(&conn).unwrap(), 0);
    let applied = run_migrations(&conn).unwrap();
    assert_eq!(applied, LATEST_VERSION);
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    assert_eq!(run_migrations(&conn).unwrap(), 0);

    let engine = StorageEngine::open_in_memory().unwrap();
    assert_eq!(engine.migrate().unwrap(), 0);
    assert_eq!(engine.schema_version().unwrap(), LATEST_VERSION);
}

#[test]
fn all_tables_exist() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    for table in [
        "products",
        "orders",
        "order_items",
        "custom_orders",
        "stock_requests",
        "schema_version",
    ] {
        let exists: bool = conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1")
            .unwrap()
            .exists([table])
            .unwrap();
        assert!(exists, "missing table {table}");
    }
}

#[test]
fn status_columns_reject_unknown_values() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    let result = conn.execute(
        "INSERT INTO orders (id, user_email, user_name, shipping_address, status,
                             total_amount, created_at, updated_at)
         VALUES ('o1', 'a@b.c', 'A', 'addr', 'lost', 1.0, 'x', 'x')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atelier.db");
    {
        let engine = StorageEngine::open(&path).unwrap();
        assert_eq!(engine.path(), Some(path.as_path()));
    }
    let engine = StorageEngine::open(&path).unwrap();
    assert_eq!(engine.migrate().unwrap(), 0);
}
