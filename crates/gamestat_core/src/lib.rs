//! Core domain logic for GameStat.
//! This crate is the single source of truth for roster business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{
    Character, CharacterDraft, CharacterId, CharacterValidationError,
};
pub use repo::character_repo::{
    CharacterRepository, RepoError, RepoResult, SqliteCharacterRepository,
};
pub use service::roster_service::{parse_level, LevelInputError, RosterService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
