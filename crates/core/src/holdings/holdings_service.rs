//! Holding service.
//!
//! Orchestrates the pure consolidation planner against the repository and
//! maintains the single-slot undo state. The service holds no lot data of
//! its own; all record state lives behind the repository trait.
//!
//! Every mutation is a read-plan-apply sequence (fetch the existing lots,
//! decide, then write), so the service holds `mutation_lock` across the
//! whole sequence. Without it, two concurrent purchases of the same ticker
//! could both read the pre-merge lots and the later merge would silently
//! drop the earlier one's quantity. The storage layer only guarantees that
//! individual writes do not interleave, not read-to-write exclusivity.

use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

use super::consolidator::{consolidate, ConsolidationPlan};
use super::holdings_model::{Holding, HoldingUpdate, NewPurchase};
use super::holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
use super::metrics::{aggregate_metrics, PortfolioMetrics};
use super::undo::{undo_plan, PendingAction, UndoOp};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};

/// Service for recording, consolidating, and undoing holding mutations.
pub struct HoldingService {
    repository: Arc<dyn HoldingRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    /// Inverse of the most recent destructive mutation. One slot only:
    /// a new mutation supersedes it, one undo consumes it.
    pending_action: Mutex<Option<PendingAction>>,
    /// Held across every read-plan-apply mutation sequence; see the
    /// module docs.
    mutation_lock: AsyncMutex<()>,
}

impl HoldingService {
    /// Creates a new HoldingService instance.
    pub fn new(
        repository: Arc<dyn HoldingRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
            pending_action: Mutex::new(None),
            mutation_lock: AsyncMutex::new(()),
        }
    }

    fn set_pending(&self, action: Option<PendingAction>) {
        *self.pending_action.lock().unwrap() = action;
    }

    fn take_pending(&self) -> Option<PendingAction> {
        self.pending_action.lock().unwrap().take()
    }

    /// Returns a copy of the recorded pending action, if any.
    pub fn pending(&self) -> Option<PendingAction> {
        self.pending_action.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HoldingServiceTrait for HoldingService {
    fn list_holdings(&self, owner_id: &str, portfolio_id: &str) -> Result<Vec<Holding>> {
        debug!("Listing holdings for portfolio {}", portfolio_id);
        self.repository.list(owner_id, portfolio_id)
    }

    fn get_holding(&self, holding_id: &str, owner_id: &str) -> Result<Holding> {
        self.repository.get_by_id(holding_id, owner_id)
    }

    fn portfolio_metrics(&self, owner_id: &str, portfolio_id: &str) -> Result<PortfolioMetrics> {
        let holdings = self.repository.list(owner_id, portfolio_id)?;
        Ok(aggregate_metrics(&holdings))
    }

    async fn add_purchase(
        &self,
        owner_id: &str,
        portfolio_id: &str,
        purchase: NewPurchase,
    ) -> Result<Holding> {
        purchase.validate()?;
        let _guard = self.mutation_lock.lock().await;
        let ticker = purchase.normalized_ticker();
        let existing = self
            .repository
            .find_by_ticker(owner_id, portfolio_id, &ticker)?;

        match consolidate(&existing, &purchase, portfolio_id, owner_id)? {
            ConsolidationPlan::Insert(new_lot) => {
                debug!("Inserting first lot of {} in {}", ticker, portfolio_id);
                let inserted = self.repository.insert(new_lot).await?;
                // A plain insert is not destructive: it records no undo
                // action, but it does supersede whatever was in the slot.
                self.set_pending(None);
                self.event_sink
                    .emit(DomainEvent::holdings_changed(portfolio_id, &ticker));
                Ok(inserted)
            }
            ConsolidationPlan::Merge {
                keep_id,
                update,
                delete_ids,
                previous,
            } => {
                info!(
                    "Merging {} lot(s) of {} into {} in portfolio {}",
                    delete_ids.len() + 1,
                    ticker,
                    keep_id,
                    portfolio_id
                );
                // Update first, then delete the duplicates: a crash in
                // between leaves the surviving lot already merged.
                let merged = self.repository.update(&keep_id, owner_id, update).await?;
                if !delete_ids.is_empty() {
                    self.repository.delete_many(&delete_ids, owner_id).await?;
                }
                self.set_pending(Some(PendingAction::Replaced(previous)));
                self.event_sink
                    .emit(DomainEvent::holdings_changed(portfolio_id, &ticker));
                Ok(merged)
            }
        }
    }

    async fn update_holding(
        &self,
        holding_id: &str,
        owner_id: &str,
        update: HoldingUpdate,
    ) -> Result<Holding> {
        update.validate()?;
        let _guard = self.mutation_lock.lock().await;
        let snapshot = self.repository.get_by_id(holding_id, owner_id)?;
        let updated = self.repository.update(holding_id, owner_id, update).await?;
        self.set_pending(Some(PendingAction::Replaced(snapshot)));
        self.event_sink.emit(DomainEvent::holdings_changed(
            updated.portfolio_id.clone(),
            updated.ticker.clone(),
        ));
        Ok(updated)
    }

    async fn delete_holding(&self, holding_id: &str, owner_id: &str) -> Result<()> {
        let _guard = self.mutation_lock.lock().await;
        let snapshot = self.repository.get_by_id(holding_id, owner_id)?;
        self.repository.delete(holding_id, owner_id).await?;
        self.event_sink.emit(DomainEvent::holdings_changed(
            snapshot.portfolio_id.clone(),
            snapshot.ticker.clone(),
        ));
        self.set_pending(Some(PendingAction::Deleted(snapshot)));
        Ok(())
    }

    async fn undo_last(&self) -> Result<bool> {
        let _guard = self.mutation_lock.lock().await;
        let Some(action) = self.take_pending() else {
            warn!("Undo requested but no action is recorded");
            return Ok(false);
        };

        match undo_plan(action) {
            UndoOp::Reinsert(holding) => {
                info!("Undo: re-inserting deleted holding {}", holding.id);
                let portfolio_id = holding.portfolio_id.clone();
                let ticker = holding.ticker.clone();
                self.repository.insert(holding).await?;
                self.event_sink
                    .emit(DomainEvent::holdings_changed(portfolio_id, ticker));
            }
            UndoOp::Restore {
                holding_id,
                owner_id,
                update,
            } => {
                info!("Undo: restoring holding {} to its prior values", holding_id);
                let restored = self
                    .repository
                    .update(&holding_id, &owner_id, update)
                    .await?;
                self.event_sink.emit(DomainEvent::holdings_changed(
                    restored.portfolio_id.clone(),
                    restored.ticker.clone(),
                ));
            }
        }
        Ok(true)
    }
}
