//! Catalog domain model.
//!
//! # Responsibility
//! - Define the animal record shape and the rules a record must satisfy
//!   before it may be stored.
//!
//! # Invariants
//! - Every stored record is identified by its caller-assigned catalog number.
//! - Validation is pure; it never touches storage.

pub mod animal;
