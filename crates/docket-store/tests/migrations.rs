use docket_store::error::StoreError;
use docket_store::Store;
use tempfile::TempDir;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    assert_eq!(store.schema_version().expect("version before"), 0);
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");
    assert_eq!(store.schema_version().expect("version"), 1);
}

#[test]
fn migrations_reject_newer_database() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("docket.sqlite3");
    {
        let store = Store::open(&db_path).expect("open store");
        store.migrate().expect("migrate");
    }
    {
        let conn = rusqlite::Connection::open(&db_path).expect("raw open");
        conn.pragma_update(None, "user_version", 99)
            .expect("bump version");
    }

    let store = Store::open(&db_path).expect("reopen store");
    let err = store.migrate().expect_err("newer schema");
    assert!(matches!(err, StoreError::SchemaTooNew { found: 99, known: 1 }));
    assert!(err.to_string().contains("newer than this build supports"));
}
