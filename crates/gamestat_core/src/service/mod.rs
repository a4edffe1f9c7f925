//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Hold the validation boundary between user input and the store.
//!
//! # See also
//! - `crate::repo::character_repo` for the persistence contract.

pub mod roster_service;
