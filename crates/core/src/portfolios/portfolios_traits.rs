//! Portfolio repository and service traits.
//!
//! These traits define the contract for portfolio operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::portfolios_model::{NewPortfolio, Portfolio};
use crate::errors::Result;

/// Trait defining the contract for Portfolio repository operations.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// Creates a new portfolio.
    async fn create(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;

    /// Retrieves a portfolio by id, scoped to its owner.
    ///
    /// A portfolio belonging to a different owner is reported as not found.
    fn get_by_id(&self, portfolio_id: &str, owner_id: &str) -> Result<Portfolio>;

    /// Lists the owner's portfolios, ordered by creation time ascending.
    fn list(&self, owner_id: &str) -> Result<Vec<Portfolio>>;
}

/// Trait defining the contract for Portfolio service operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Creates a new portfolio with business validation.
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;

    /// Retrieves a portfolio by id, scoped to its owner.
    fn get_portfolio(&self, portfolio_id: &str, owner_id: &str) -> Result<Portfolio>;

    /// Lists the owner's portfolios, creating the default one first if the
    /// owner has none yet.
    async fn list_portfolios(&self, owner_id: &str) -> Result<Vec<Portfolio>>;
}
