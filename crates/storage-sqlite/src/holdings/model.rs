//! Database model for holdings.
//!
//! Decimal and date columns are stored as TEXT in the legacy format. Values
//! are written canonically (decimal string, `YYYY-MM-DD`) and read back
//! tolerantly: a corrupt cell is logged and replaced with a neutral value
//! rather than failing the whole query.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use lecapfolio_core::holdings::Holding;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database model for holdings, using the legacy column names.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub id: String,
    pub portfolio_id: String,
    pub user_id: String,
    pub ticker: String,
    pub cantidad: String,
    pub precio_compra: String,
    pub precio_finish: String,
    pub fecha_compra: String,
    pub fecha_finish: String,
    pub created_at: NaiveDateTime,
}

fn parse_decimal_tolerant(raw: &str, column: &str, id: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or_else(|e| {
        log::error!(
            "Invalid decimal '{}' in holdings.{} for id {}: {}. Using 0.",
            raw,
            column,
            id,
            e
        );
        Decimal::ZERO
    })
}

fn parse_date_tolerant(raw: &str, column: &str, id: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).unwrap_or_else(|e| {
        log::error!(
            "Invalid date '{}' in holdings.{} for id {}: {}. Using the epoch.",
            raw,
            column,
            id,
            e
        );
        NaiveDate::default()
    })
}

impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        let quantity = parse_decimal_tolerant(&db.cantidad, "cantidad", &db.id);
        let purchase_price = parse_decimal_tolerant(&db.precio_compra, "precio_compra", &db.id);
        let maturity_price = parse_decimal_tolerant(&db.precio_finish, "precio_finish", &db.id);
        let purchase_date = parse_date_tolerant(&db.fecha_compra, "fecha_compra", &db.id);
        let maturity_date = parse_date_tolerant(&db.fecha_finish, "fecha_finish", &db.id);

        Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            owner_id: db.user_id,
            ticker: db.ticker,
            quantity,
            purchase_price,
            maturity_price,
            purchase_date,
            maturity_date,
        }
    }
}

impl HoldingDB {
    /// Builds a row for a domain holding, stamping `created_at` now.
    pub fn from_domain(holding: Holding) -> Self {
        Self::from_domain_at(holding, chrono::Utc::now().naive_utc())
    }

    /// Builds a row for a domain holding with an explicit `created_at`,
    /// used when rewriting an existing row so its creation order survives.
    pub fn from_domain_at(holding: Holding, created_at: NaiveDateTime) -> Self {
        Self {
            id: holding.id,
            portfolio_id: holding.portfolio_id,
            user_id: holding.owner_id,
            ticker: holding.ticker,
            cantidad: holding.quantity.to_string(),
            precio_compra: holding.purchase_price.to_string(),
            precio_finish: holding.maturity_price.to_string(),
            fecha_compra: holding.purchase_date.format(DATE_FORMAT).to_string(),
            fecha_finish: holding.maturity_date.format(DATE_FORMAT).to_string(),
            created_at,
        }
    }
}
