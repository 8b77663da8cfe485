//! Repository layer for the animal catalog.
//!
//! # Responsibility
//! - Define the storage contract the manager depends on.
//! - Isolate SQLite details from business rules.
//!
//! # Invariants
//! - Repositories never validate records; they persist what they are given.
//! - "Not found" on reads is `Ok(None)` / empty, never an error.

pub mod animal_repo;
