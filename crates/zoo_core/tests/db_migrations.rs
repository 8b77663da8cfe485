use rusqlite::Connection;
use zoo_core::db::migrations::{latest_version, schema_version};
use zoo_core::db::{open_db, open_db_in_memory, DbError};
use zoo_core::{AnimalRecord, AnimalRepository, SqliteAnimalRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert!(object_exists(&conn, "table", "animals"));
    assert!(object_exists(&conn, "index", "idx_animals_type"));
}

#[test]
fn reopening_a_file_keeps_schema_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zoo.sqlite3");
    let fox = AnimalRecord {
        catalog_number: "00HNTWXTQSH4".to_string(),
        name: "Puppi".to_string(),
        breed: "Cape fox".to_string(),
        animal_type: "Mammal".to_string(),
        age: 3,
        gender: "Male".to_string(),
        is_healthy: true,
    };

    {
        let conn = open_db(&path).unwrap();
        SqliteAnimalRepository::try_new(&conn)
            .unwrap()
            .insert(&fox)
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_all().unwrap(), vec![fox]);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
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

fn object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2);",
        [kind, name],
        |row| row.get(0),
    )
    .unwrap()
}
