//! SQLite storage implementation for Lecapfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `lecapfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor that serializes all mutations
//! - Repository implementations with database-specific model types
//!
//! This crate is the only place where Diesel dependencies exist; the core
//! crate is database-agnostic and works with traits.
//!
//! The column names of the `holdings` table (`cantidad`, `precio_compra`,
//! `precio_finish`, `fecha_compra`, `fecha_finish`) keep the legacy store's
//! naming so an existing database keeps working unchanged.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod holdings;
pub mod portfolios;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{DieselErrorExt, StorageError};

// Re-export from lecapfolio-core for convenience
pub use lecapfolio_core::errors::{DatabaseError, Error, Result};
