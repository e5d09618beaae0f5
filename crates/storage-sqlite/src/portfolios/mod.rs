//! SQLite-backed portfolio repository.

mod model;
mod repository;

pub use model::PortfolioDB;
pub use repository::SqlitePortfolioRepository;
