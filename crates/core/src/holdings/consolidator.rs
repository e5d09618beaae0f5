//! Lot consolidation planner.
//!
//! Pure decision function: given the lots already recorded for a
//! `(portfolio, ticker)` pair and one new purchase, decide whether to
//! insert a fresh lot or collapse everything into a single
//! weighted-average position. The planner never touches storage; callers
//! apply the returned plan through the repository, update before delete,
//! so a crash between the two steps leaves the surviving lot already
//! holding the merged values.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::holdings_model::{Holding, HoldingUpdate, NewPurchase};
use crate::constants::ROUNDING_SCALE;
use crate::errors::Result;

/// Outcome of a consolidation decision.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsolidationPlan {
    /// No lots exist for this ticker yet; persist the new lot as-is.
    Insert(Holding),
    /// Collapse all existing lots plus the new purchase into the first lot.
    Merge {
        /// The surviving lot: the first element of `existing_lots`.
        /// Callers must supply lots in creation order for this choice to
        /// be reproducible.
        keep_id: String,
        /// Merged field values to apply to the surviving lot.
        update: HoldingUpdate,
        /// All other lots for the same ticker; deleted after the update.
        delete_ids: Vec<String>,
        /// Pre-merge snapshot of the surviving lot, for undo.
        previous: Holding,
    },
}

/// Decides how to record a purchase against the lots that already exist
/// for the same `(portfolio, ticker)` pair.
///
/// Validation fails fast with the offending field and no plan; the caller
/// must not have mutated anything by this point.
pub fn consolidate(
    existing_lots: &[Holding],
    purchase: &NewPurchase,
    portfolio_id: &str,
    owner_id: &str,
) -> Result<ConsolidationPlan> {
    purchase.validate()?;
    let ticker = purchase.normalized_ticker();

    let Some((keep, duplicates)) = existing_lots.split_first() else {
        return Ok(ConsolidationPlan::Insert(Holding {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            owner_id: owner_id.to_string(),
            ticker,
            quantity: purchase.quantity,
            purchase_price: purchase.purchase_price,
            maturity_price: purchase.maturity_price,
            purchase_date: purchase.purchase_date,
            maturity_date: purchase.maturity_date,
        }));
    };

    let total_quantity: Decimal =
        existing_lots.iter().map(|lot| lot.quantity).sum::<Decimal>() + purchase.quantity;
    let total_cost: Decimal = existing_lots
        .iter()
        .map(|lot| lot.quantity * lot.purchase_price)
        .sum::<Decimal>()
        + purchase.quantity * purchase.purchase_price;
    // PPC: cost-basis-preserving weighted average purchase price.
    let weighted_average_price = (total_cost / total_quantity).round_dp(ROUNDING_SCALE);

    let earliest_purchase = existing_lots
        .iter()
        .map(|lot| lot.purchase_date)
        .chain(std::iter::once(purchase.purchase_date))
        .min()
        .unwrap_or(purchase.purchase_date);
    let latest_maturity = existing_lots
        .iter()
        .map(|lot| lot.maturity_date)
        .chain(std::iter::once(purchase.maturity_date))
        .max()
        .unwrap_or(purchase.maturity_date);

    Ok(ConsolidationPlan::Merge {
        keep_id: keep.id.clone(),
        update: HoldingUpdate {
            ticker,
            quantity: total_quantity,
            purchase_price: weighted_average_price,
            // Most recent maturity estimate wins; never averaged.
            maturity_price: purchase.maturity_price,
            purchase_date: earliest_purchase,
            maturity_date: latest_maturity,
        },
        delete_ids: duplicates.iter().map(|lot| lot.id.clone()).collect(),
        previous: keep.clone(),
    })
}
