//! Yield metrics calculator.
//!
//! Pure functions deriving holding-period and annualized yield figures
//! from a [`Holding`]. Capital amounts stay in `Decimal`; rates are `f64`
//! so an economically undefined rate can be reported as `NAN` instead of
//! an error (zero quantity, non-positive prices, and similar degenerate
//! rows reach the sentinel branch rather than faulting).

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::holdings_model::Holding;
use crate::constants::{DAYS_PER_YEAR, ROUNDING_SCALE};

/// Derived metrics for one holding. Never persisted; recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingMetrics {
    /// Calendar days between purchase and maturity, floored at 1.
    pub days_held: i64,
    pub capital_invested: Decimal,
    pub capital_at_maturity: Decimal,
    /// Fractional return over the holding period.
    pub simple_return: f64,
    /// TNA: linear (non-compounded) ACT/365 annualization of the simple return.
    pub nominal_annual_rate: f64,
    /// TEA: compound ACT/365 annualization.
    pub effective_annual_rate: f64,
    /// For a bullet instrument this equals the effective annual rate.
    pub yield_to_maturity: f64,
}

/// Aggregate yield metrics over a portfolio's holdings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    pub total_invested: Decimal,
    pub total_at_maturity: Decimal,
    pub simple_return: f64,
    /// Capital-weighted average TNA over rows with a defined rate.
    pub nominal_annual_rate: f64,
    /// Capital-weighted average TEA over rows with a defined rate.
    pub effective_annual_rate: f64,
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Computes the derived metrics for a single holding.
///
/// Deterministic and side-effect free. Day counts work on calendar dates
/// only, so time-of-day and timezone effects cannot leak in; a maturity on
/// or before the purchase date counts as one day held.
pub fn compute_metrics(holding: &Holding) -> HoldingMetrics {
    let days_held = (holding.maturity_date - holding.purchase_date).num_days().max(1);

    let capital_invested = (holding.quantity * holding.purchase_price).round_dp(ROUNDING_SCALE);
    let capital_at_maturity = (holding.quantity * holding.maturity_price).round_dp(ROUNDING_SCALE);

    if capital_invested <= Decimal::ZERO || capital_at_maturity <= Decimal::ZERO {
        // Sentinel branch: no meaningful rate exists for zero or negative
        // capital, and the capitals themselves are reported as zero.
        return HoldingMetrics {
            days_held,
            capital_invested: Decimal::ZERO,
            capital_at_maturity: Decimal::ZERO,
            simple_return: f64::NAN,
            nominal_annual_rate: f64::NAN,
            effective_annual_rate: f64::NAN,
            yield_to_maturity: f64::NAN,
        };
    }

    let invested = to_f64(capital_invested);
    let at_maturity = to_f64(capital_at_maturity);
    let annualization = DAYS_PER_YEAR as f64 / days_held as f64;

    let simple_return = (at_maturity - invested) / invested;
    let nominal_annual_rate = simple_return * annualization;
    let effective_annual_rate = (at_maturity / invested).powf(annualization) - 1.0;

    HoldingMetrics {
        days_held,
        capital_invested,
        capital_at_maturity,
        simple_return,
        nominal_annual_rate,
        effective_annual_rate,
        yield_to_maturity: effective_annual_rate,
    }
}

/// Computes portfolio-level totals and capital-weighted average rates.
///
/// Rows in the sentinel state contribute nothing: their capitals are zero
/// and their rates are excluded from the weighted averages.
pub fn aggregate_metrics(holdings: &[Holding]) -> PortfolioMetrics {
    let mut total_invested = Decimal::ZERO;
    let mut total_at_maturity = Decimal::ZERO;
    let mut weighted_tna = 0.0;
    let mut weighted_tea = 0.0;
    let mut rated_capital = 0.0;

    for holding in holdings {
        let metrics = compute_metrics(holding);
        total_invested += metrics.capital_invested;
        total_at_maturity += metrics.capital_at_maturity;

        if metrics.effective_annual_rate.is_finite() {
            let weight = to_f64(metrics.capital_invested);
            weighted_tna += metrics.nominal_annual_rate * weight;
            weighted_tea += metrics.effective_annual_rate * weight;
            rated_capital += weight;
        }
    }

    let simple_return = if total_invested > Decimal::ZERO {
        (to_f64(total_at_maturity) - to_f64(total_invested)) / to_f64(total_invested)
    } else {
        f64::NAN
    };
    let (nominal_annual_rate, effective_annual_rate) = if rated_capital > 0.0 {
        (weighted_tna / rated_capital, weighted_tea / rated_capital)
    } else {
        (f64::NAN, f64::NAN)
    };

    PortfolioMetrics {
        total_invested,
        total_at_maturity,
        simple_return,
        nominal_annual_rate,
        effective_annual_rate,
    }
}
