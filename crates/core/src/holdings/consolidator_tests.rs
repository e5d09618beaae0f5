//! Unit tests for the lot consolidation planner.

use super::consolidator::{consolidate, ConsolidationPlan};
use super::holdings_model::{Holding, NewPurchase};
use crate::errors::{Error, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn lot(id: &str, quantity: Decimal, price: Decimal, from: NaiveDate, to: NaiveDate) -> Holding {
    Holding {
        id: id.to_string(),
        portfolio_id: "pf-1".to_string(),
        owner_id: "user-1".to_string(),
        ticker: "S31O5".to_string(),
        quantity,
        purchase_price: price,
        maturity_price: dec!(100),
        purchase_date: from,
        maturity_date: to,
    }
}

fn purchase(quantity: Decimal, price: Decimal, from: NaiveDate, to: NaiveDate) -> NewPurchase {
    NewPurchase {
        ticker: "s31o5".to_string(),
        quantity,
        purchase_price: price,
        maturity_price: dec!(100),
        purchase_date: from,
        maturity_date: to,
    }
}

// ============================================================================
// Insert decision
// ============================================================================

#[test]
fn test_first_purchase_inserts_new_lot() {
    let p = purchase(dec!(10), dec!(95), date(2025, 1, 1), date(2025, 6, 1));
    let plan = consolidate(&[], &p, "pf-1", "user-1").unwrap();

    match plan {
        ConsolidationPlan::Insert(new_lot) => {
            assert!(!new_lot.id.is_empty());
            assert_eq!(new_lot.ticker, "S31O5");
            assert_eq!(new_lot.portfolio_id, "pf-1");
            assert_eq!(new_lot.owner_id, "user-1");
            assert_eq!(new_lot.quantity, dec!(10));
            assert_eq!(new_lot.purchase_price, dec!(95));
        }
        other => panic!("expected Insert, got {:?}", other),
    }
}

#[test]
fn test_inserted_ids_are_unique() {
    let p = purchase(dec!(10), dec!(95), date(2025, 1, 1), date(2025, 6, 1));
    let a = consolidate(&[], &p, "pf-1", "user-1").unwrap();
    let b = consolidate(&[], &p, "pf-1", "user-1").unwrap();
    let (ConsolidationPlan::Insert(a), ConsolidationPlan::Insert(b)) = (a, b) else {
        panic!("expected two Insert plans");
    };
    assert_ne!(a.id, b.id);
}

// ============================================================================
// Merge decision
// ============================================================================

#[test]
fn test_merge_weighted_average_scenario() {
    // Existing 10 @ 95 (2025-01-01..2025-06-01), buying 10 @ 97
    // (2025-02-01..2025-07-01) must yield 20 @ 96 spanning both ranges.
    let existing = vec![lot(
        "keep",
        dec!(10),
        dec!(95),
        date(2025, 1, 1),
        date(2025, 6, 1),
    )];
    let p = purchase(dec!(10), dec!(97), date(2025, 2, 1), date(2025, 7, 1));

    let plan = consolidate(&existing, &p, "pf-1", "user-1").unwrap();
    let ConsolidationPlan::Merge {
        keep_id,
        update,
        delete_ids,
        previous,
    } = plan
    else {
        panic!("expected Merge");
    };

    assert_eq!(keep_id, "keep");
    assert!(delete_ids.is_empty());
    assert_eq!(update.quantity, dec!(20));
    assert_eq!(update.purchase_price, dec!(96));
    assert_eq!(update.maturity_price, dec!(100));
    assert_eq!(update.purchase_date, date(2025, 1, 1));
    assert_eq!(update.maturity_date, date(2025, 7, 1));
    assert_eq!(previous, existing[0]);
}

#[test]
fn test_merge_collapses_all_duplicates_into_first_lot() {
    let existing = vec![
        lot("a", dec!(5), dec!(90), date(2025, 1, 10), date(2025, 5, 1)),
        lot("b", dec!(5), dec!(92), date(2025, 1, 20), date(2025, 6, 1)),
        lot("c", dec!(5), dec!(94), date(2025, 1, 5), date(2025, 4, 1)),
    ];
    let p = purchase(dec!(5), dec!(96), date(2025, 2, 1), date(2025, 7, 1));

    let ConsolidationPlan::Merge {
        keep_id,
        update,
        delete_ids,
        ..
    } = consolidate(&existing, &p, "pf-1", "user-1").unwrap()
    else {
        panic!("expected Merge");
    };

    assert_eq!(keep_id, "a");
    assert_eq!(delete_ids, vec!["b".to_string(), "c".to_string()]);
    assert_eq!(update.quantity, dec!(20));
    // Earliest purchase across all lots, including one not on the kept lot.
    assert_eq!(update.purchase_date, date(2025, 1, 5));
    assert_eq!(update.maturity_date, date(2025, 7, 1));
}

#[test]
fn test_merge_preserves_cost_basis() {
    let existing = vec![
        lot("a", dec!(3.5), dec!(91.37), date(2025, 1, 1), date(2025, 5, 1)),
        lot("b", dec!(11.25), dec!(88.911), date(2025, 1, 2), date(2025, 6, 1)),
    ];
    let p = purchase(dec!(7.77), dec!(93.01), date(2025, 2, 1), date(2025, 7, 1));

    let ConsolidationPlan::Merge { update, .. } =
        consolidate(&existing, &p, "pf-1", "user-1").unwrap()
    else {
        panic!("expected Merge");
    };

    let expected_basis: Decimal = existing
        .iter()
        .map(|l| l.quantity * l.purchase_price)
        .sum::<Decimal>()
        + p.quantity * p.purchase_price;
    let merged_basis = update.purchase_price * update.quantity;
    let diff = (merged_basis - expected_basis).abs();
    assert!(diff < dec!(0.0001), "basis drift: {}", diff);
}

#[test]
fn test_merge_date_bounds_cover_all_inputs() {
    let existing = vec![
        lot("a", dec!(1), dec!(90), date(2025, 3, 1), date(2025, 9, 1)),
        lot("b", dec!(1), dec!(90), date(2025, 2, 1), date(2025, 10, 1)),
    ];
    let p = purchase(dec!(1), dec!(90), date(2025, 4, 1), date(2025, 8, 1));

    let ConsolidationPlan::Merge { update, .. } =
        consolidate(&existing, &p, "pf-1", "user-1").unwrap()
    else {
        panic!("expected Merge");
    };

    for l in &existing {
        assert!(update.purchase_date <= l.purchase_date);
        assert!(update.maturity_date >= l.maturity_date);
    }
    assert!(update.purchase_date <= p.purchase_date);
    assert!(update.maturity_date >= p.maturity_date);
}

#[test]
fn test_merge_takes_latest_maturity_price_estimate() {
    let existing = vec![lot(
        "a",
        dec!(10),
        dec!(95),
        date(2025, 1, 1),
        date(2025, 6, 1),
    )];
    let mut p = purchase(dec!(10), dec!(95), date(2025, 2, 1), date(2025, 7, 1));
    p.maturity_price = dec!(102.5);

    let ConsolidationPlan::Merge { update, .. } =
        consolidate(&existing, &p, "pf-1", "user-1").unwrap()
    else {
        panic!("expected Merge");
    };
    assert_eq!(update.maturity_price, dec!(102.5));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_blank_ticker_is_rejected() {
    let mut p = purchase(dec!(10), dec!(95), date(2025, 1, 1), date(2025, 6, 1));
    p.ticker = "   ".to_string();

    let err = consolidate(&[], &p, "pf-1", "user-1").unwrap_err();
    match err {
        Error::Validation(ValidationError::MissingField(field)) => assert_eq!(field, "ticker"),
        other => panic!("expected missing ticker, got {}", other),
    }
}

#[test]
fn test_non_positive_quantity_is_rejected() {
    let p = purchase(dec!(0), dec!(95), date(2025, 1, 1), date(2025, 6, 1));
    let err = consolidate(&[], &p, "pf-1", "user-1").unwrap_err();
    match err {
        Error::Validation(ValidationError::NonPositive { field, .. }) => {
            assert_eq!(field, "quantity")
        }
        other => panic!("expected non-positive quantity, got {}", other),
    }
}

#[test]
fn test_negative_price_is_rejected() {
    let p = purchase(dec!(10), dec!(-95), date(2025, 1, 1), date(2025, 6, 1));
    assert!(consolidate(&[], &p, "pf-1", "user-1").is_err());
}
