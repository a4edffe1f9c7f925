//! Character domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record and the caller-supplied draft.
//! - Provide field validation for the draft shape.
//!
//! # Invariants
//! - `id` is assigned by the store, unique, monotonic, and never reused.
//! - `name`, `weapon` and `realm` are non-empty after trimming.
//! - `level` is non-negative by construction (`u32`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CharacterId = i64;

/// A persisted character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Assigned by the store on creation; immutable afterwards.
    pub id: CharacterId,
    pub name: String,
    pub weapon: String,
    /// Non-negative; the storage column carries a matching CHECK constraint.
    pub level: u32,
    pub realm: String,
}

/// Caller-supplied character fields without a store identity.
///
/// Used by both create and update paths. The service layer validates drafts
/// before they reach the repository; the repository trusts its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    pub weapon: String,
    pub level: u32,
    pub realm: String,
}

/// Field-level validation failure for a `CharacterDraft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterValidationError {
    EmptyName,
    EmptyWeapon,
    EmptyRealm,
}

impl Display for CharacterValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "character name must not be empty"),
            Self::EmptyWeapon => write!(f, "character weapon must not be empty"),
            Self::EmptyRealm => write!(f, "character realm must not be empty"),
        }
    }
}

impl Error for CharacterValidationError {}

impl CharacterDraft {
    /// Builds a draft from raw user input, trimming surrounding whitespace.
    pub fn from_input(name: &str, weapon: &str, level: u32, realm: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            weapon: weapon.trim().to_string(),
            level,
            realm: realm.trim().to_string(),
        }
    }

    /// Checks the non-empty field invariants.
    ///
    /// `level` needs no check here: `u32` cannot encode a negative value.
    pub fn validate(&self) -> Result<(), CharacterValidationError> {
        if self.name.trim().is_empty() {
            return Err(CharacterValidationError::EmptyName);
        }
        if self.weapon.trim().is_empty() {
            return Err(CharacterValidationError::EmptyWeapon);
        }
        if self.realm.trim().is_empty() {
            return Err(CharacterValidationError::EmptyRealm);
        }
        Ok(())
    }

    /// Attaches a store-assigned identity to this draft.
    pub fn into_character(self, id: CharacterId) -> Character {
        Character {
            id,
            name: self.name,
            weapon: self.weapon,
            level: self.level,
            realm: self.realm,
        }
    }
}
