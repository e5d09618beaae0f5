//! Lecapfolio Core - Domain entities, calculators, services, and traits.
//!
//! This crate contains the business logic for tracking LECAP holdings:
//! the yield metrics calculator, the lot consolidation planner, the undo
//! mechanism, and the services that orchestrate them. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod auth;
pub mod constants;
pub mod errors;
pub mod events;
pub mod holdings;
pub mod portfolios;

// Re-export common types from the holdings and portfolios modules
pub use holdings::*;
pub use portfolios::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
