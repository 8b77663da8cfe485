//! Business-rule services over repositories.
//!
//! # Responsibility
//! - Validate inputs before any store mutation.
//! - Translate empty reads and bad arguments into caller-facing errors.

pub mod animals_manager;
