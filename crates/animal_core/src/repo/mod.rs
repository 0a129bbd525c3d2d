//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for the animal catalog.
//! - Isolate SQLite query details from manager/business orchestration.
//!
//! # Invariants
//! - Repositories report existence/absence only; business rules live in
//!   `service::animal_manager`.

pub mod animal_repo;
