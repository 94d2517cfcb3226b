use docket_core::db::migrations::latest_version;
use docket_core::db::{open_db, open_db_in_memory, DbError};
use docket_core::{KeyValueRepository, SqliteKeyValueRepository};
use rusqlite::Connection;

#[test]
fn fresh_database_gets_kv_store_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        columns(&conn, "kv_store"),
        vec![
            ("key".to_string(), "TEXT".to_string(), true, 1),
            ("value".to_string(), "TEXT".to_string(), true, 0),
            ("updated_at".to_string(), "INTEGER".to_string(), true, 0),
        ]
    );
}

#[test]
fn updated_at_defaults_to_current_millis() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES ('dockets', '[]');",
        [],
    )
    .unwrap();

    let (updated_at, now_ms): (i64, i64) = conn
        .query_row(
            "SELECT updated_at, strftime('%s', 'now') * 1000 FROM kv_store WHERE key = 'dockets';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert!(updated_at > 0);
    assert_eq!(updated_at % 1000, 0);
    assert!((now_ms - updated_at).abs() <= 1000);
}

#[test]
fn reopening_keeps_schema_version_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docket.sqlite3");

    let repo = SqliteKeyValueRepository::new(open_db(&path).unwrap());
    repo.set("dockets", "[]").unwrap();
    drop(repo);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let repo = SqliteKeyValueRepository::new(conn);
    assert_eq!(repo.get("dockets").unwrap().as_deref(), Some("[]"));
}

#[test]
fn failing_migration_reports_version_and_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conflict.sqlite3");

    // An index may not share a name with a table, even under IF NOT EXISTS.
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE legacy (x INTEGER);
         CREATE INDEX kv_store ON legacy (x);",
    )
    .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::Migration { version, ref source } => {
            assert_eq!(version, 1);
            assert!(source.to_string().contains("kv_store"), "{source}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

/// `(name, type, notnull, pk)` for each column in declaration order.
fn columns(conn: &Connection, table: &str) -> Vec<(String, String, bool, i64)> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i64>(3)? != 0,
            row.get::<_, i64>(5)?,
        ))
    })
    .unwrap()
    .collect::<Result<_, _>>()
    .unwrap()
}
