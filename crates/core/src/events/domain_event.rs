//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. They carry just
/// enough identity for an adapter to decide what to refresh; they never
/// carry the mutated records themselves.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Holdings were created, merged, updated, or deleted.
    HoldingsChanged {
        portfolio_ids: Vec<String>,
        tickers: Vec<String>,
    },

    /// Portfolios were created.
    PortfoliosChanged { portfolio_ids: Vec<String> },

    /// The active session changed (login or logout).
    SessionChanged {
        /// `None` on logout.
        user_id: Option<String>,
    },
}

impl DomainEvent {
    /// Creates a HoldingsChanged event for a single portfolio/ticker pair.
    pub fn holdings_changed(portfolio_id: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self::HoldingsChanged {
            portfolio_ids: vec![portfolio_id.into()],
            tickers: vec![ticker.into()],
        }
    }

    /// Creates a PortfoliosChanged event.
    pub fn portfolios_changed(portfolio_ids: Vec<String>) -> Self {
        Self::PortfoliosChanged { portfolio_ids }
    }

    /// Creates a SessionChanged event.
    pub fn session_changed(user_id: Option<String>) -> Self {
        Self::SessionChanged { user_id }
    }
}
