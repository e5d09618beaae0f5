//! Holding repository and service traits.
//!
//! These traits define the contract for holding operations without any
//! database-specific types, allowing for different storage implementations.
//! Reads are synchronous, mutations asynchronous; every method is scoped to
//! an owner so a record belonging to another user is simply not visible.

use async_trait::async_trait;

use super::holdings_model::{Holding, HoldingUpdate, NewPurchase};
use super::metrics::PortfolioMetrics;
use crate::errors::Result;

/// Trait defining the contract for Holding repository operations.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    /// Lists a portfolio's holdings, ordered by maturity date ascending.
    fn list(&self, owner_id: &str, portfolio_id: &str) -> Result<Vec<Holding>>;

    /// Finds the lots recorded for one ticker within a portfolio, ordered
    /// by creation time ascending. The ticker must already be normalized.
    fn find_by_ticker(
        &self,
        owner_id: &str,
        portfolio_id: &str,
        ticker: &str,
    ) -> Result<Vec<Holding>>;

    /// Retrieves a holding by id, scoped to its owner.
    fn get_by_id(&self, holding_id: &str, owner_id: &str) -> Result<Holding>;

    /// Inserts a holding. The caller supplies the identifier (freshly
    /// generated, or the original one when undoing a delete).
    async fn insert(&self, holding: Holding) -> Result<Holding>;

    /// Applies an update to a holding, returning the updated record.
    async fn update(
        &self,
        holding_id: &str,
        owner_id: &str,
        update: HoldingUpdate,
    ) -> Result<Holding>;

    /// Deletes a holding by id. Returns the number of deleted records.
    async fn delete(&self, holding_id: &str, owner_id: &str) -> Result<usize>;

    /// Deletes several holdings by id. Returns the number of deleted records.
    async fn delete_many(&self, holding_ids: &[String], owner_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Holding service operations.
#[async_trait]
pub trait HoldingServiceTrait: Send + Sync {
    /// Lists a portfolio's holdings, ordered by maturity date ascending.
    fn list_holdings(&self, owner_id: &str, portfolio_id: &str) -> Result<Vec<Holding>>;

    /// Retrieves a single holding, scoped to its owner.
    fn get_holding(&self, holding_id: &str, owner_id: &str) -> Result<Holding>;

    /// Computes the portfolio-level aggregate metrics.
    fn portfolio_metrics(&self, owner_id: &str, portfolio_id: &str) -> Result<PortfolioMetrics>;

    /// Records a purchase: inserts a new lot, or merges into the existing
    /// position for the same ticker. Returns the surviving holding.
    async fn add_purchase(
        &self,
        owner_id: &str,
        portfolio_id: &str,
        purchase: NewPurchase,
    ) -> Result<Holding>;

    /// Edits a holding's fields, recording the pre-edit snapshot for undo.
    async fn update_holding(
        &self,
        holding_id: &str,
        owner_id: &str,
        update: HoldingUpdate,
    ) -> Result<Holding>;

    /// Deletes a holding, recording the full record for undo.
    async fn delete_holding(&self, holding_id: &str, owner_id: &str) -> Result<()>;

    /// Reverses the most recent destructive mutation, if one is recorded.
    /// Returns `false` when the undo slot is empty.
    async fn undo_last(&self) -> Result<bool>;
}
