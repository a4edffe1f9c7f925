//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the character roster.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes trust caller-validated drafts; field validation is
//!   the service layer's job.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod character_repo;
