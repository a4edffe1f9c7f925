//! FFI use-case API for GUI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level roster functions to Dart via FRB.
//! - Keep error semantics simple for the form-and-list UI.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Only validated primitives cross the boundary; the UI passes the
//!   selected record's `id` directly and never parses it out of display
//!   text.
//! - One store connection is opened per process lifetime and reused for
//!   every operation.

use gamestat_core::db::open_db;
use gamestat_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_level,
    ping as ping_inner, Character, RepoError, RosterService, SqliteCharacterRepository,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static STORE: OnceLock<StoreState> = OnceLock::new();

struct StoreState {
    db_path: PathBuf,
    conn: Mutex<Connection>,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same configuration (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the roster store at `db_path`, creating the file on first run.
///
/// # FFI contract
/// - Must be called before any roster operation.
/// - Idempotent for the same path; reconfiguration with a different path
///   returns an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String) -> String {
    let requested = PathBuf::from(db_path);

    if let Some(state) = STORE.get() {
        if state.db_path == requested {
            return String::new();
        }
        return format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            state.db_path.display(),
            requested.display()
        );
    }

    let conn = match open_db(&requested) {
        Ok(conn) => conn,
        Err(err) => return format!("failed to open roster store: {err}"),
    };
    if let Err(err) = SqliteCharacterRepository::try_new(&conn) {
        return format!("roster store is unusable: {err}");
    }

    match STORE.set(StoreState {
        db_path: requested,
        conn: Mutex::new(conn),
    }) {
        Ok(()) => String::new(),
        // Lost a configure race; keep the winner if it holds the same path.
        Err(state) => {
            let winner = STORE.get();
            match winner {
                Some(active) if active.db_path == state.db_path => String::new(),
                Some(active) => format!(
                    "store already configured at `{}`",
                    active.db_path.display()
                ),
                None => "store configuration failed".to_string(),
            }
        }
    }
}

/// Character record shape exposed to the UI list and form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterView {
    /// Store-assigned id; the UI selection model holds this directly.
    pub id: i64,
    pub name: String,
    pub weapon: String,
    pub level: u32,
    pub realm: String,
}

impl From<Character> for CharacterView {
    fn from(character: Character) -> Self {
        Self {
            id: character.id,
            name: character.name,
            weapon: character.weapon,
            level: character.level,
            realm: character.realm,
        }
    }
}

/// Generic action response envelope for roster mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// The affected record, when the operation produced one.
    pub character: Option<CharacterView>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, character: Option<CharacterView>) -> Self {
        Self {
            ok: true,
            character,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            character: None,
            message: message.into(),
        }
    }
}

/// Roster list response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterResponse {
    /// Whether the list fetch succeeded.
    pub ok: bool,
    /// Roster ordered by id ascending; empty on failure.
    pub items: Vec<CharacterView>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Validates form input and creates a character.
///
/// `level_text` is the raw form field; non-numeric or negative text is
/// rejected here, before the store is reached.
///
/// # FFI contract
/// - Sync call backed by the process-wide store connection.
/// - Never panics; failures are reported through the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn add_character(
    name: String,
    weapon: String,
    level_text: String,
    realm: String,
) -> ActionResponse {
    let level = match parse_level(&level_text) {
        Ok(level) => level,
        Err(err) => return ActionResponse::failure(err.to_string()),
    };

    match with_service(|service| service.create_character(&name, &weapon, level, &realm)) {
        Ok(character) => {
            let message = format!("{} added", character.name);
            ActionResponse::success(message, Some(character.into()))
        }
        Err(message) => ActionResponse::failure(message),
    }
}

/// Fetches the full roster ordered by id ascending.
///
/// # FFI contract
/// - Sync call backed by the process-wide store connection.
/// - Never panics; failures are reported through the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn list_characters() -> RosterResponse {
    match with_service(|service| service.list_characters()) {
        Ok(characters) => RosterResponse {
            ok: true,
            message: format!("{} character(s)", characters.len()),
            items: characters.into_iter().map(CharacterView::from).collect(),
        },
        Err(message) => RosterResponse {
            ok: false,
            items: Vec::new(),
            message,
        },
    }
}

/// Validates form input and overwrites an existing character.
///
/// # FFI contract
/// - Sync call backed by the process-wide store connection.
/// - Not-found is reported through the envelope, never as a panic.
#[flutter_rust_bridge::frb(sync)]
pub fn update_character(
    id: i64,
    name: String,
    weapon: String,
    level_text: String,
    realm: String,
) -> ActionResponse {
    let level = match parse_level(&level_text) {
        Ok(level) => level,
        Err(err) => return ActionResponse::failure(err.to_string()),
    };

    match with_service(|service| service.update_character(id, &name, &weapon, level, &realm)) {
        Ok(character) => {
            let message = format!("{} updated", character.name);
            ActionResponse::success(message, Some(character.into()))
        }
        Err(message) => ActionResponse::failure(message),
    }
}

/// Deletes a character by store id.
///
/// # FFI contract
/// - Sync call backed by the process-wide store connection.
/// - Deleting an id that no longer exists returns `ok=false` with a
///   not-found message and changes nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_character(id: i64) -> ActionResponse {
    match with_service(|service| service.delete_character(id)) {
        Ok(true) => ActionResponse::success(format!("character {id} deleted"), None),
        Ok(false) => ActionResponse::failure(format!("character not found: {id}")),
        Err(message) => ActionResponse::failure(message),
    }
}

fn with_service<T>(
    f: impl FnOnce(&RosterService<SqliteCharacterRepository<'_>>) -> Result<T, RepoError>,
) -> Result<T, String> {
    let state = STORE
        .get()
        .ok_or_else(|| "store not configured; call configure_store first".to_string())?;
    let conn = state
        .conn
        .lock()
        .map_err(|_| "store connection is poisoned".to_string())?;
    let repo = SqliteCharacterRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = RosterService::new(repo);
    f(&service).map_err(|err| err.to_string())
}
