//! SQLite-backed holding repository.

mod model;
mod repository;

pub use model::HoldingDB;
pub use repository::SqliteHoldingRepository;
