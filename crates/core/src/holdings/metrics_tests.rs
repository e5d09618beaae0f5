//! Unit tests for the yield metrics calculator.

use super::holdings_model::Holding;
use super::metrics::{aggregate_metrics, compute_metrics};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn holding(
    quantity: Decimal,
    purchase_price: Decimal,
    maturity_price: Decimal,
    purchase_date: NaiveDate,
    maturity_date: NaiveDate,
) -> Holding {
    Holding {
        id: "h-1".to_string(),
        portfolio_id: "pf-1".to_string(),
        owner_id: "user-1".to_string(),
        ticker: "S31O5".to_string(),
        quantity,
        purchase_price,
        maturity_price,
        purchase_date,
        maturity_date,
    }
}

const TOLERANCE: f64 = 1e-4;

// ============================================================================
// Happy path
// ============================================================================

#[test]
fn test_full_year_discount_note() {
    // 100 units bought at 80, redeemed at 100, held 364 days.
    let h = holding(
        dec!(100),
        dec!(80),
        dec!(100),
        date(2025, 1, 1),
        date(2025, 12, 31),
    );
    let m = compute_metrics(&h);

    assert_eq!(m.days_held, 364);
    assert_eq!(m.capital_invested, dec!(8000));
    assert_eq!(m.capital_at_maturity, dec!(10000));
    assert!((m.simple_return - 0.25).abs() < TOLERANCE);
    // TNA = 0.25 * 365/364; TEA = 1.25^(365/364) - 1
    assert!((m.nominal_annual_rate - 0.250687).abs() < TOLERANCE);
    assert!((m.effective_annual_rate - 0.250767).abs() < TOLERANCE);
    assert_eq!(m.yield_to_maturity, m.effective_annual_rate);
}

#[test]
fn test_rates_finite_for_valid_holdings() {
    let h = holding(
        dec!(10),
        dec!(95.5),
        dec!(100),
        date(2025, 3, 1),
        date(2025, 6, 1),
    );
    let m = compute_metrics(&h);

    assert!(m.days_held >= 1);
    assert!(m.simple_return.is_finite());
    assert!(m.nominal_annual_rate.is_finite());
    assert!(m.effective_annual_rate.is_finite());
    assert!(m.effective_annual_rate > m.simple_return);
}

#[test]
fn test_metrics_are_deterministic() {
    let h = holding(
        dec!(7),
        dec!(91.23),
        dec!(100),
        date(2025, 2, 10),
        date(2025, 9, 15),
    );
    assert_eq!(compute_metrics(&h), compute_metrics(&h));
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn test_zero_quantity_yields_sentinel() {
    let h = holding(
        dec!(0),
        dec!(95),
        dec!(100),
        date(2025, 1, 1),
        date(2025, 6, 1),
    );
    let m = compute_metrics(&h);

    assert_eq!(m.capital_invested, Decimal::ZERO);
    assert_eq!(m.capital_at_maturity, Decimal::ZERO);
    assert!(m.simple_return.is_nan());
    assert!(m.nominal_annual_rate.is_nan());
    assert!(m.effective_annual_rate.is_nan());
    assert!(m.yield_to_maturity.is_nan());
}

#[test]
fn test_negative_price_yields_sentinel() {
    let h = holding(
        dec!(10),
        dec!(-95),
        dec!(100),
        date(2025, 1, 1),
        date(2025, 6, 1),
    );
    let m = compute_metrics(&h);

    assert_eq!(m.capital_invested, Decimal::ZERO);
    assert!(m.effective_annual_rate.is_nan());
}

#[test]
fn test_same_day_counts_as_one_day() {
    let h = holding(
        dec!(10),
        dec!(99),
        dec!(100),
        date(2025, 5, 5),
        date(2025, 5, 5),
    );
    let m = compute_metrics(&h);

    assert_eq!(m.days_held, 1);
    assert!(m.effective_annual_rate.is_finite());
}

#[test]
fn test_backdated_maturity_floors_at_one_day() {
    let h = holding(
        dec!(10),
        dec!(99),
        dec!(100),
        date(2025, 5, 5),
        date(2025, 4, 1),
    );
    assert_eq!(compute_metrics(&h).days_held, 1);
}

// ============================================================================
// Portfolio aggregation
// ============================================================================

#[test]
fn test_aggregate_sums_capitals_and_weights_rates() {
    let a = holding(
        dec!(100),
        dec!(80),
        dec!(100),
        date(2025, 1, 1),
        date(2025, 12, 31),
    );
    let b = holding(
        dec!(10),
        dec!(95),
        dec!(100),
        date(2025, 1, 1),
        date(2025, 6, 1),
    );
    let agg = aggregate_metrics(&[a.clone(), b.clone()]);

    assert_eq!(agg.total_invested, dec!(8950));
    assert_eq!(agg.total_at_maturity, dec!(11000));
    assert!((agg.simple_return - (11000.0 - 8950.0) / 8950.0).abs() < TOLERANCE);

    // Weighted TEA lies between the two individual TEAs.
    let tea_a = compute_metrics(&a).effective_annual_rate;
    let tea_b = compute_metrics(&b).effective_annual_rate;
    let (lo, hi) = if tea_a < tea_b {
        (tea_a, tea_b)
    } else {
        (tea_b, tea_a)
    };
    assert!(agg.effective_annual_rate >= lo && agg.effective_annual_rate <= hi);
}

#[test]
fn test_aggregate_skips_sentinel_rows() {
    let valid = holding(
        dec!(10),
        dec!(95),
        dec!(100),
        date(2025, 1, 1),
        date(2025, 6, 1),
    );
    let degenerate = holding(
        dec!(0),
        dec!(95),
        dec!(100),
        date(2025, 1, 1),
        date(2025, 6, 1),
    );
    let agg = aggregate_metrics(&[valid.clone(), degenerate]);

    assert_eq!(agg.total_invested, dec!(950));
    let solo = compute_metrics(&valid);
    assert!((agg.effective_annual_rate - solo.effective_annual_rate).abs() < TOLERANCE);
}

#[test]
fn test_aggregate_of_empty_portfolio() {
    let agg = aggregate_metrics(&[]);
    assert_eq!(agg.total_invested, Decimal::ZERO);
    assert!(agg.simple_return.is_nan());
    assert!(agg.effective_annual_rate.is_nan());
}
