use recordtree_core::db::migrations::latest_version;
use recordtree_core::db::{open_db, open_db_in_memory};
use recordtree_core::{
    assign_addresses, JsonFileTreeStore, Record, SqliteTreeStore, StoreError, TreeStore,
};
use rusqlite::Connection;

fn sample_tree() -> Vec<Record> {
    vec![
        Record::with_id("a").field("name", "Alpha"),
        Record::with_id("b").section("x", vec![Record::with_id("c")]),
    ]
}

#[test]
fn migration_creates_tree_documents_table() {
    let conn = open_db_in_memory().unwrap();

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());

    let mut stmt = conn.prepare("PRAGMA table_info(tree_documents);").unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(columns, vec!["name", "body", "updated_at"]);
}

#[test]
fn reopening_file_database_keeps_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteTreeStore::try_new(&conn, "records").unwrap();
        store.save(&sample_tree()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteTreeStore::try_new(&conn, "records").unwrap();
    assert_eq!(store.load().unwrap(), sample_tree());
}

#[test]
fn sqlite_store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteTreeStore::try_new(&conn, "records").err().unwrap();
    assert!(matches!(
        err,
        StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        } if expected_version == latest_version()
    ));
}

#[test]
fn sqlite_store_loads_unsaved_document_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTreeStore::try_new(&conn, "never-saved").unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn sqlite_documents_are_isolated_by_name() {
    let conn = open_db_in_memory().unwrap();
    let first = SqliteTreeStore::try_new(&conn, "first").unwrap();
    let second = SqliteTreeStore::try_new(&conn, "second").unwrap();

    first.save(&sample_tree()).unwrap();
    second.save(&[Record::with_id("only")]).unwrap();
    first.save(&sample_tree()[..1]).unwrap();

    assert_eq!(first.load().unwrap().len(), 1);
    assert_eq!(second.load().unwrap()[0].id(), Some("only"));
    assert_eq!(second.document(), "second");
}

#[test]
fn stores_never_persist_addresses() {
    let addressed = assign_addresses(sample_tree());

    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteTreeStore::try_new(&conn, "records").unwrap();
    sqlite.save(&addressed).unwrap();
    let body: String = conn
        .query_row(
            "SELECT body FROM tree_documents WHERE name = 'records';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(!body.contains("__path"));

    let dir = tempfile::tempdir().unwrap();
    let json = JsonFileTreeStore::new(dir.path().join("records.json"));
    json.save(&addressed).unwrap();
    let body = std::fs::read_to_string(json.path()).unwrap();
    assert!(!body.contains("__path"));
    assert_eq!(json.load().unwrap(), sample_tree());
}

#[test]
fn json_store_writes_two_space_pretty_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileTreeStore::new(dir.path().join("records.json"));
    store.save(&[Record::with_id("a")]).unwrap();

    let body = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(body, "[\n  {\n    \"data\": {\n      \"ID\": \"a\"\n    }\n  }\n]");
}

#[test]
fn json_store_discards_stray_paths_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::write(&path, r#"[{"data": {"ID": "a"}, "__path": ["4"]}]"#).unwrap();

    let loaded = JsonFileTreeStore::new(&path).load().unwrap();
    assert_eq!(loaded, vec![Record::with_id("a")]);
}

#[test]
fn json_store_reports_missing_file_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = JsonFileTreeStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn json_store_reports_unwritable_location() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileTreeStore::new(dir.path().join("missing-dir").join("records.json"));
    let err = store.save(&sample_tree()).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}
