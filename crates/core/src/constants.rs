/// Day-count base for annualization (ACT/365 fixed).
pub const DAYS_PER_YEAR: i64 = 365;

/// Name given to the portfolio created automatically on first access.
pub const DEFAULT_PORTFOLIO_NAME: &str = "General";

/// Decimal precision for price and quantity calculations.
pub const ROUNDING_SCALE: u32 = 8;
