//! Holding domain models and the untrusted-input boundary.

use chrono::{NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};

/// Normalizes an instrument symbol: trimmed and upper-cased.
///
/// Ticker matching is case-insensitive everywhere; normalization happens
/// once at the boundary so the rest of the crate compares exact strings.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Domain model representing one owned position of an instrument within a
/// portfolio - either a single purchase lot or the consolidated result of
/// several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub portfolio_id: String,
    pub owner_id: String,
    pub ticker: String,
    pub quantity: Decimal,
    /// Price per unit at acquisition (weighted average after consolidation).
    pub purchase_price: Decimal,
    /// Expected redemption price per unit at maturity.
    pub maturity_price: Decimal,
    pub purchase_date: NaiveDate,
    pub maturity_date: NaiveDate,
}

/// Input model for recording a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub ticker: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub maturity_price: Decimal,
    pub purchase_date: NaiveDate,
    pub maturity_date: NaiveDate,
}

impl NewPurchase {
    /// The instrument symbol this purchase refers to, normalized.
    pub fn normalized_ticker(&self) -> String {
        normalize_ticker(&self.ticker)
    }

    /// Validates the purchase data.
    ///
    /// Fails fast with the offending field; callers must not mutate
    /// anything when validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.normalized_ticker().is_empty() {
            return Err(ValidationError::MissingField("ticker".to_string()).into());
        }
        for (field, value) in [
            ("quantity", self.quantity),
            ("purchasePrice", self.purchase_price),
            ("maturityPrice", self.maturity_price),
        ] {
            if value <= Decimal::ZERO {
                return Err(ValidationError::NonPositive {
                    field: field.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Field set applied to an existing holding by an edit or a merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingUpdate {
    pub ticker: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub maturity_price: Decimal,
    pub purchase_date: NaiveDate,
    pub maturity_date: NaiveDate,
}

impl HoldingUpdate {
    /// Same field rules as a new purchase.
    pub fn validate(&self) -> Result<()> {
        NewPurchase {
            ticker: self.ticker.clone(),
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            maturity_price: self.maturity_price,
            purchase_date: self.purchase_date,
            maturity_date: self.maturity_date,
        }
        .validate()
    }
}

impl From<&Holding> for HoldingUpdate {
    fn from(holding: &Holding) -> Self {
        Self {
            ticker: holding.ticker.clone(),
            quantity: holding.quantity,
            purchase_price: holding.purchase_price,
            maturity_price: holding.maturity_price,
            purchase_date: holding.purchase_date,
            maturity_date: holding.maturity_date,
        }
    }
}

impl Holding {
    /// Applies an update in place, returning the modified holding.
    pub fn with_update(mut self, update: &HoldingUpdate) -> Self {
        self.ticker = normalize_ticker(&update.ticker);
        self.quantity = update.quantity;
        self.purchase_price = update.purchase_price;
        self.maturity_price = update.maturity_price;
        self.purchase_date = update.purchase_date;
        self.maturity_date = update.maturity_date;
        self
    }
}

/// Untrusted purchase record as it arrives from a form or a legacy store.
///
/// All fields are optional and loosely typed; the legacy Spanish field
/// names used by the existing store are accepted as aliases. Two exits
/// exist from this type: [`RawPurchase::parse`], the strict boundary used
/// before any mutation, and [`RawPurchase::coerce`], the lenient path used
/// to render metrics for rows that may be malformed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPurchase {
    pub ticker: Option<String>,
    #[serde(alias = "cantidad")]
    pub quantity: Option<Value>,
    #[serde(alias = "precio_compra")]
    pub purchase_price: Option<Value>,
    #[serde(alias = "precio_finish")]
    pub maturity_price: Option<Value>,
    #[serde(alias = "fecha_compra")]
    pub purchase_date: Option<String>,
    #[serde(alias = "fecha_finish")]
    pub maturity_date: Option<String>,
}

/// Reads a decimal out of a loosely-typed JSON value (number or string).
fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(Decimal::from_f64)
            .or_else(|| Decimal::from_str(&n.to_string()).ok()),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn decimal_field(field: &'static str, value: &Option<Value>) -> Result<Decimal> {
    let raw = value
        .as_ref()
        .ok_or_else(|| ValidationError::MissingField(field.to_string()))?;
    value_to_decimal(raw).ok_or_else(|| {
        ValidationError::InvalidInput(format!("field '{}' is not a number: {}", field, raw)).into()
    })
}

fn date_field(field: &'static str, value: &Option<String>) -> Result<NaiveDate> {
    let raw = value
        .as_ref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ValidationError::MissingField(field.to_string()))?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidInput(format!("field '{}' is not a date: {}", field, raw)).into()
    })
}

impl RawPurchase {
    /// Strict construction boundary: every field present, well-typed, and
    /// valid, or a `ValidationError` naming the offending field.
    pub fn parse(&self) -> Result<NewPurchase> {
        let ticker = self
            .ticker
            .as_deref()
            .map(normalize_ticker)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ValidationError::MissingField("ticker".to_string()))?;

        let purchase = NewPurchase {
            ticker,
            quantity: decimal_field("quantity", &self.quantity)?,
            purchase_price: decimal_field("purchasePrice", &self.purchase_price)?,
            maturity_price: decimal_field("maturityPrice", &self.maturity_price)?,
            purchase_date: date_field("purchaseDate", &self.purchase_date)?,
            maturity_date: date_field("maturityDate", &self.maturity_date)?,
        };
        purchase.validate()?;
        Ok(purchase)
    }

    /// Lenient coercion for display rows: missing or malformed numerics
    /// become zero, missing dates become today. The result feeds the
    /// metrics calculator, whose sentinel branch absorbs the zeros; this
    /// path never fails.
    pub fn coerce(&self) -> Holding {
        let today = Utc::now().date_naive();
        let decimal_or_zero = |value: &Option<Value>| {
            value
                .as_ref()
                .and_then(value_to_decimal)
                .unwrap_or(Decimal::ZERO)
        };
        let date_or_today = |value: &Option<String>| {
            value
                .as_ref()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
                .unwrap_or(today)
        };

        Holding {
            id: String::new(),
            portfolio_id: String::new(),
            owner_id: String::new(),
            ticker: self.ticker.as_deref().map(normalize_ticker).unwrap_or_default(),
            quantity: decimal_or_zero(&self.quantity),
            purchase_price: decimal_or_zero(&self.purchase_price),
            maturity_price: decimal_or_zero(&self.maturity_price),
            purchase_date: date_or_today(&self.purchase_date),
            maturity_date: date_or_today(&self.maturity_date),
        }
    }
}
