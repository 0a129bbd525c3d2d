//! Core use-case services.
//!
//! # Responsibility
//! - Hold business rules and input validation above the repository layer.
//! - Keep callers decoupled from storage details.

pub mod animal_manager;
