//! Holdings module - models, calculators, consolidation, undo, and service.

mod consolidator;
mod holdings_model;
mod holdings_service;
mod holdings_traits;
mod metrics;
mod undo;

#[cfg(test)]
mod consolidator_tests;
#[cfg(test)]
mod metrics_tests;

// Re-export the public interface
pub use consolidator::{consolidate, ConsolidationPlan};
pub use holdings_model::{normalize_ticker, Holding, HoldingUpdate, NewPurchase, RawPurchase};
pub use holdings_service::HoldingService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
pub use metrics::{aggregate_metrics, compute_metrics, HoldingMetrics, PortfolioMetrics};
pub use undo::{undo_plan, PendingAction, UndoOp};
