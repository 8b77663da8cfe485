//! Animal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Mechanical get/find/insert/update/delete over the `animals` table.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - No business validation happens here; callers guarantee valid records.
//! - Reads return rows in storage (insertion) order, `rowid ASC`.
//! - Every operation is a single statement, so it is atomic on its own.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::animal::AnimalRecord;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ANIMALS_TABLE: &str = "animals";
const ANIMALS_REQUIRED_COLUMNS: &[&str] = &[
    "catalog_number",
    "name",
    "breed",
    "type",
    "age",
    "gender",
    "is_healthy",
];

const ANIMAL_SELECT_SQL: &str = "SELECT
    catalog_number,
    name,
    breed,
    type,
    age,
    gender,
    is_healthy
FROM animals";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for animal storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// No stored row carries this catalog number.
    NotFound(String),
    /// A stored row could not be decoded into a record.
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(catalog_number) => write!(f, "animal not found: {catalog_number}"),
            Self::InvalidData(message) => write!(f, "invalid persisted animal data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is older than required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Predicate for [`AnimalRepository::find`].
///
/// Every `Some` field is an exact-match filter; filters are ANDed. The
/// default query matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalQuery {
    pub animal_type: Option<String>,
    pub gender: Option<String>,
    pub is_healthy: Option<bool>,
}

impl AnimalQuery {
    /// Matches records whose `type` equals `animal_type` exactly.
    pub fn by_type(animal_type: impl Into<String>) -> Self {
        Self {
            animal_type: Some(animal_type.into()),
            ..Self::default()
        }
    }

    /// Evaluates the predicate against an in-memory record.
    pub fn matches(&self, animal: &AnimalRecord) -> bool {
        self.animal_type
            .as_deref()
            .map_or(true, |value| animal.animal_type == value)
            && self
                .gender
                .as_deref()
                .map_or(true, |value| animal.gender == value)
            && self
                .is_healthy
                .map_or(true, |value| animal.is_healthy == value)
    }
}

/// Storage contract used by the animals manager.
pub trait AnimalRepository {
    /// All records in storage order; empty is not an error.
    fn get_all(&self) -> RepoResult<Vec<AnimalRecord>>;
    /// One record by key; absence is `Ok(None)`.
    fn get_by_key(&self, catalog_number: &str) -> RepoResult<Option<AnimalRecord>>;
    /// Records matching `query`, in storage order.
    fn find(&self, query: &AnimalQuery) -> RepoResult<Vec<AnimalRecord>>;
    /// Stores a new record. Duplicate keys are rejected by the store.
    fn insert(&self, animal: &AnimalRecord) -> RepoResult<()>;
    /// Overwrites the record sharing `animal.catalog_number`.
    ///
    /// Returns `RepoError::NotFound` when no such record exists.
    fn update(&self, animal: &AnimalRecord) -> RepoResult<()>;
    /// Removes the record if present and reports whether a row went away.
    fn delete(&self, catalog_number: &str) -> RepoResult<bool>;
}

/// SQLite-backed animal repository.
pub struct SqliteAnimalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnimalRepository<'conn> {
    /// Builds a repository over a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is behind.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   `animals` table does not have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_animals(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<AnimalRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut animals = Vec::new();

        while let Some(row) = rows.next()? {
            animals.push(parse_animal_row(row)?);
        }

        Ok(animals)
    }
}

impl AnimalRepository for SqliteAnimalRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<AnimalRecord>> {
        self.query_animals(&format!("{ANIMAL_SELECT_SQL} ORDER BY rowid ASC;"), Vec::new())
    }

    fn get_by_key(&self, catalog_number: &str) -> RepoResult<Option<AnimalRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ANIMAL_SELECT_SQL} WHERE catalog_number = ?1;"))?;

        let row = stmt
            .query_row([catalog_number], |row| Ok(parse_animal_row(row)))
            .optional()?;
        row.transpose()
    }

    fn find(&self, query: &AnimalQuery) -> RepoResult<Vec<AnimalRecord>> {
        let mut sql = format!("{ANIMAL_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(animal_type) = &query.animal_type {
            sql.push_str(" AND type = ?");
            bind_values.push(Value::Text(animal_type.clone()));
        }
        if let Some(gender) = &query.gender {
            sql.push_str(" AND gender = ?");
            bind_values.push(Value::Text(gender.clone()));
        }
        if let Some(is_healthy) = query.is_healthy {
            sql.push_str(" AND is_healthy = ?");
            bind_values.push(Value::Integer(bool_to_int(is_healthy)));
        }

        sql.push_str(" ORDER BY rowid ASC;");
        self.query_animals(&sql, bind_values)
    }

    fn insert(&self, animal: &AnimalRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO animals (
                catalog_number,
                name,
                breed,
                type,
                age,
                gender,
                is_healthy
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                animal.catalog_number.as_str(),
                animal.name.as_str(),
                animal.breed.as_str(),
                animal.animal_type.as_str(),
                animal.age,
                animal.gender.as_str(),
                bool_to_int(animal.is_healthy),
            ],
        )?;

        Ok(())
    }

    fn update(&self, animal: &AnimalRecord) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE animals
             SET
                name = ?2,
                breed = ?3,
                type = ?4,
                age = ?5,
                gender = ?6,
                is_healthy = ?7
             WHERE catalog_number = ?1;",
            params![
                animal.catalog_number.as_str(),
                animal.name.as_str(),
                animal.breed.as_str(),
                animal.animal_type.as_str(),
                animal.age,
                animal.gender.as_str(),
                bool_to_int(animal.is_healthy),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(animal.catalog_number.clone()));
        }

        Ok(())
    }

    fn delete(&self, catalog_number: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM animals WHERE catalog_number = ?1;",
            [catalog_number],
        )?;
        Ok(changed > 0)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [ANIMALS_TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(ANIMALS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([ANIMALS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(column) = ANIMALS_REQUIRED_COLUMNS
        .iter()
        .find(|required| !columns.iter().any(|column| column.as_str() == **required))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: ANIMALS_TABLE,
            column: *column,
        });
    }

    Ok(())
}

fn parse_animal_row(row: &Row<'_>) -> RepoResult<AnimalRecord> {
    let catalog_number: String = row.get("catalog_number")?;
    let is_healthy = match row.get::<_, i64>("is_healthy")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_healthy value `{other}` for animal `{catalog_number}`"
            )));
        }
    };

    Ok(AnimalRecord {
        catalog_number,
        name: row.get("name")?,
        breed: row.get("breed")?,
        animal_type: row.get("type")?,
        age: row.get("age")?,
        gender: row.get("gender")?,
        is_healthy,
    })
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
