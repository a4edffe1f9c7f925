//! Domain model for the character roster.
//!
//! # Responsibility
//! - Define the canonical `Character` record and its draft/input shape.
//!
//! # Invariants
//! - Every persisted character is identified by a store-assigned `CharacterId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod character;
