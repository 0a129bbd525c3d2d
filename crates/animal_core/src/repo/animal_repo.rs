//! Animal repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide raw CRUD APIs over the `animals` table.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - No business validation happens here; callers own input checks.
//! - Duplicate catalog numbers are accepted on insert.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Rows come back in insertion order.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{AnimalStore, DbError};
use crate::model::animal::{Animal, AnimalId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ANIMAL_SELECT_SQL: &str = "SELECT
    uuid,
    catalog_number,
    name,
    breed,
    type,
    age,
    gender,
    is_healthy
FROM animals";

const ANIMALS_TABLE: &str = "animals";
const ANIMALS_REQUIRED_COLUMNS: &[&str] = &[
    "seq",
    "uuid",
    "catalog_number",
    "name",
    "breed",
    "type",
    "age",
    "gender",
    "is_healthy",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for animal persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(AnimalId),
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
            Self::NotFound(id) => write!(f, "animal not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted animal data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
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

/// Repository interface for animal CRUD operations.
pub trait AnimalRepository {
    /// Inserts one row. Duplicate catalog numbers are not rejected.
    fn add_animal(&self, animal: &Animal) -> RepoResult<()>;
    /// Removes every row with the catalog number; returns the removed count.
    fn delete_animal(&self, catalog_number: &str) -> RepoResult<usize>;
    /// Returns all rows in insertion order.
    fn list_animals(&self) -> RepoResult<Vec<Animal>>;
    /// Returns the earliest row with the catalog number.
    fn get_animal(&self, catalog_number: &str) -> RepoResult<Option<Animal>>;
    /// Returns rows whose type matches exactly.
    fn search_by_type(&self, kind: &str) -> RepoResult<Vec<Animal>>;
    /// Overwrites the row with the same stable id.
    fn update_animal(&self, animal: &Animal) -> RepoResult<()>;
}

/// SQLite-backed animal repository.
#[derive(Debug, Clone)]
pub struct SqliteAnimalRepository {
    store: AnimalStore,
}

impl SqliteAnimalRepository {
    /// Constructs a repository over a migrated store.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema is
    ///   not the shape this repository queries.
    pub fn try_new(store: AnimalStore) -> RepoResult<Self> {
        {
            let conn = store.lock()?;
            ensure_connection_ready(&conn)?;
        }
        Ok(Self { store })
    }

    /// Returns the underlying store handle.
    pub fn store(&self) -> &AnimalStore {
        &self.store
    }

    fn query_animals(&self, sql: &str, key: Option<&str>) -> RepoResult<Vec<Animal>> {
        let conn = self.store.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = match key {
            Some(value) => stmt.query([value])?,
            None => stmt.query([])?,
        };

        let mut animals = Vec::new();
        while let Some(row) = rows.next()? {
            animals.push(parse_animal_row(row)?);
        }
        Ok(animals)
    }
}

impl AnimalRepository for SqliteAnimalRepository {
    fn add_animal(&self, animal: &Animal) -> RepoResult<()> {
        let conn = self.store.lock()?;
        conn.execute(
            "INSERT INTO animals (
                uuid,
                catalog_number,
                name,
                breed,
                type,
                age,
                gender,
                is_healthy
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                animal.id.to_string(),
                animal.catalog_number.as_str(),
                animal.name.as_str(),
                animal.breed.as_str(),
                animal.kind.as_str(),
                animal.age,
                animal.gender.as_str(),
                bool_to_int(animal.is_healthy),
            ],
        )?;
        Ok(())
    }

    fn delete_animal(&self, catalog_number: &str) -> RepoResult<usize> {
        let conn = self.store.lock()?;
        let removed = conn.execute(
            "DELETE FROM animals WHERE catalog_number = ?1;",
            [catalog_number],
        )?;
        Ok(removed)
    }

    fn list_animals(&self) -> RepoResult<Vec<Animal>> {
        self.query_animals(&format!("{ANIMAL_SELECT_SQL} ORDER BY seq ASC;"), None)
    }

    fn get_animal(&self, catalog_number: &str) -> RepoResult<Option<Animal>> {
        let sql = format!(
            "{ANIMAL_SELECT_SQL}
             WHERE catalog_number = ?1
             ORDER BY seq ASC
             LIMIT 1;"
        );
        Ok(self
            .query_animals(&sql, Some(catalog_number))?
            .into_iter()
            .next())
    }

    fn search_by_type(&self, kind: &str) -> RepoResult<Vec<Animal>> {
        let sql = format!(
            "{ANIMAL_SELECT_SQL}
             WHERE type = ?1
             ORDER BY seq ASC;"
        );
        self.query_animals(&sql, Some(kind))
    }

    fn update_animal(&self, animal: &Animal) -> RepoResult<()> {
        let conn = self.store.lock()?;
        let changed = conn.execute(
            "UPDATE animals
             SET
                catalog_number = ?1,
                name = ?2,
                breed = ?3,
                type = ?4,
                age = ?5,
                gender = ?6,
                is_healthy = ?7
             WHERE uuid = ?8;",
            params![
                animal.catalog_number.as_str(),
                animal.name.as_str(),
                animal.breed.as_str(),
                animal.kind.as_str(),
                animal.age,
                animal.gender.as_str(),
                bool_to_int(animal.is_healthy),
                animal.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(animal.id));
        }

        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [ANIMALS_TABLE],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable(ANIMALS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([ANIMALS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in ANIMALS_REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name.as_str() == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: ANIMALS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_animal_row(row: &Row<'_>) -> RepoResult<Animal> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in animals.uuid"))
    })?;

    let is_healthy = match row.get::<_, i64>("is_healthy")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_healthy value `{other}` in animals.is_healthy"
            )));
        }
    };

    Ok(Animal {
        id,
        catalog_number: row.get("catalog_number")?,
        name: row.get("name")?,
        breed: row.get("breed")?,
        kind: row.get("type")?,
        age: row.get("age")?,
        gender: row.get("gender")?,
        is_healthy,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
