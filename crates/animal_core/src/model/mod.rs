//! Domain model for the animal catalog.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every animal is identified by a stable `AnimalId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod animal;
