//! Roster use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for presentation callers.
//! - Validate user-supplied fields before they reach the repository.
//!
//! # Invariants
//! - No draft reaches the repository without passing `validate()`.
//! - Service layer remains storage-agnostic.

use crate::model::character::{Character, CharacterDraft, CharacterId};
use crate::repo::character_repo::{CharacterRepository, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Use-case service wrapper for roster CRUD operations.
pub struct RosterService<R: CharacterRepository> {
    repo: R,
}

impl<R: CharacterRepository> RosterService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates input fields and persists a new character.
    ///
    /// # Contract
    /// - Trims all text fields.
    /// - Returns `RepoError::Validation` when a field is empty; nothing is
    ///   written in that case.
    pub fn create_character(
        &self,
        name: &str,
        weapon: &str,
        level: u32,
        realm: &str,
    ) -> RepoResult<Character> {
        let draft = CharacterDraft::from_input(name, weapon, level, realm);
        draft.validate()?;
        let character = self.repo.create(&draft)?;
        info!(
            "event=character_create module=service status=ok id={}",
            character.id
        );
        Ok(character)
    }

    /// Gets one character by store id.
    pub fn get_character(&self, id: CharacterId) -> RepoResult<Option<Character>> {
        self.repo.get(id)
    }

    /// Lists the full roster ordered by id ascending.
    pub fn list_characters(&self) -> RepoResult<Vec<Character>> {
        self.repo.list_all()
    }

    /// Validates input fields and overwrites an existing character.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_character(
        &self,
        id: CharacterId,
        name: &str,
        weapon: &str,
        level: u32,
        realm: &str,
    ) -> RepoResult<Character> {
        let draft = CharacterDraft::from_input(name, weapon, level, realm);
        draft.validate()?;
        let character = self.repo.update(id, &draft)?;
        info!(
            "event=character_update module=service status=ok id={}",
            character.id
        );
        Ok(character)
    }

    /// Deletes a character by id; `Ok(false)` when it no longer exists.
    pub fn delete_character(&self, id: CharacterId) -> RepoResult<bool> {
        let removed = self.repo.delete(id)?;
        info!(
            "event=character_delete module=service status=ok id={id} removed={removed}"
        );
        Ok(removed)
    }
}

/// Rejection reason for user-typed level input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelInputError {
    NotANumber,
    Negative,
}

impl Display for LevelInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber => write!(f, "level must be an integer"),
            Self::Negative => write!(f, "level must not be negative"),
        }
    }
}

impl Error for LevelInputError {}

/// Parses a level out of raw form input.
///
/// Negative and non-numeric text is rejected here so it never reaches the
/// store. A leading `-` is reported as `Negative` rather than the generic
/// parse failure to keep form feedback specific.
pub fn parse_level(text: &str) -> Result<u32, LevelInputError> {
    let trimmed = text.trim();
    if trimmed.starts_with('-') && trimmed[1..].chars().all(|c| c.is_ascii_digit()) && trimmed.len() > 1 {
        return Err(LevelInputError::Negative);
    }
    trimmed.parse::<u32>().map_err(|_| LevelInputError::NotANumber)
}
