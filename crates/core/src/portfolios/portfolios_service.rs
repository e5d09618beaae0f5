//! Portfolio service.

use log::{debug, info};
use std::sync::Arc;

use super::portfolios_model::{NewPortfolio, Portfolio};
use super::portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::constants::DEFAULT_PORTFOLIO_NAME;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};

/// Service for managing portfolios.
///
/// Guarantees the "every owner has at least one portfolio" invariant by
/// creating the default portfolio on first access.
pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl PortfolioService {
    /// Creates a new PortfolioService instance.
    pub fn new(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    /// Creates the default portfolio for an owner that has none yet.
    async fn ensure_default_portfolio(&self, owner_id: &str) -> Result<Vec<Portfolio>> {
        let portfolios = self.repository.list(owner_id)?;
        if !portfolios.is_empty() {
            return Ok(portfolios);
        }

        info!(
            "Owner {} has no portfolios, creating default '{}'",
            owner_id, DEFAULT_PORTFOLIO_NAME
        );
        let created = self
            .repository
            .create(NewPortfolio::new(owner_id, DEFAULT_PORTFOLIO_NAME))
            .await?;
        self.event_sink
            .emit(DomainEvent::portfolios_changed(vec![created.id.clone()]));

        Ok(vec![created])
    }
}

#[async_trait::async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        new_portfolio.validate()?;
        debug!(
            "Creating portfolio '{}' for owner {}",
            new_portfolio.name, new_portfolio.owner_id
        );

        let created = self.repository.create(new_portfolio).await?;
        self.event_sink
            .emit(DomainEvent::portfolios_changed(vec![created.id.clone()]));
        Ok(created)
    }

    fn get_portfolio(&self, portfolio_id: &str, owner_id: &str) -> Result<Portfolio> {
        self.repository.get_by_id(portfolio_id, owner_id)
    }

    async fn list_portfolios(&self, owner_id: &str) -> Result<Vec<Portfolio>> {
        debug!("Listing portfolios for owner {}", owner_id);
        self.ensure_default_portfolio(owner_id).await
    }
}
