//! Character repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `characters` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths trust caller-validated drafts (the service layer validates
//!   before calling in).
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::character::{Character, CharacterDraft, CharacterId, CharacterValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CHARACTER_SELECT_SQL: &str = "SELECT
    id,
    name,
    weapon,
    level,
    realm
FROM characters";

const REQUIRED_COLUMNS: &[&str] = &["id", "name", "weapon", "level", "realm"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for character persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CharacterValidationError),
    Db(DbError),
    NotFound(CharacterId),
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
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "character not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted character data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CharacterValidationError> for RepoError {
    fn from(value: CharacterValidationError) -> Self {
        Self::Validation(value)
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

/// Repository interface for character CRUD operations.
pub trait CharacterRepository {
    /// Persists a new character and returns it with its assigned id.
    fn create(&self, draft: &CharacterDraft) -> RepoResult<Character>;
    /// Primary-key lookup.
    fn get(&self, id: CharacterId) -> RepoResult<Option<Character>>;
    /// Every record, ordered by id ascending.
    fn list_all(&self) -> RepoResult<Vec<Character>>;
    /// Overwrites all four fields of an existing record.
    fn update(&self, id: CharacterId, draft: &CharacterDraft) -> RepoResult<Character>;
    /// Removes a record; returns `false` when no such id exists.
    fn delete(&self, id: CharacterId) -> RepoResult<bool>;
}

/// SQLite-backed character repository.
pub struct SqliteCharacterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCharacterRepository<'conn> {
    /// Wraps a connection after verifying it was opened through the store
    /// bootstrap path.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not contain the expected `characters` shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = 'characters'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("characters"));
        }

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('characters');")?;
        let mut rows = stmt.query([])?;
        let mut present: Vec<String> = Vec::new();
        while let Some(row) = rows.next()? {
            present.push(row.get(0)?);
        }
        for column in REQUIRED_COLUMNS {
            if !present.iter().any(|name| name == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: "characters",
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl CharacterRepository for SqliteCharacterRepository<'_> {
    fn create(&self, draft: &CharacterDraft) -> RepoResult<Character> {
        self.conn.execute(
            "INSERT INTO characters (name, weapon, level, realm)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.name.as_str(),
                draft.weapon.as_str(),
                draft.level,
                draft.realm.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        Ok(draft.clone().into_character(id))
    }

    fn get(&self, id: CharacterId) -> RepoResult<Option<Character>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHARACTER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_character_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Character>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHARACTER_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut characters = Vec::new();
        while let Some(row) = rows.next()? {
            characters.push(parse_character_row(row)?);
        }

        Ok(characters)
    }

    fn update(&self, id: CharacterId, draft: &CharacterDraft) -> RepoResult<Character> {
        let changed = self.conn.execute(
            "UPDATE characters
             SET
                name = ?1,
                weapon = ?2,
                level = ?3,
                realm = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                draft.name.as_str(),
                draft.weapon.as_str(),
                draft.level,
                draft.realm.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(draft.clone().into_character(id))
    }

    fn delete(&self, id: CharacterId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM characters WHERE id = ?1;", params![id])?;

        Ok(changed > 0)
    }
}

fn parse_character_row(row: &Row<'_>) -> RepoResult<Character> {
    let id: CharacterId = row.get("id")?;

    let level_raw: i64 = row.get("level")?;
    let level = u32::try_from(level_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "level {level_raw} for character {id} is outside the supported range"
        ))
    })?;

    let character = Character {
        id,
        name: row.get("name")?,
        weapon: row.get("weapon")?,
        level,
        realm: row.get("realm")?,
    };

    for (field, value) in [
        ("name", character.name.as_str()),
        ("weapon", character.weapon.as_str()),
        ("realm", character.realm.as_str()),
    ] {
        if value.trim().is_empty() {
            return Err(RepoError::InvalidData(format!(
                "empty {field} for character {id} in characters.{field}"
            )));
        }
    }

    Ok(character)
}
