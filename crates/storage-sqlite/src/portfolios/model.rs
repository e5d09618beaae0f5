//! Database model for portfolios.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use lecapfolio_core::portfolios::{NewPortfolio, Portfolio};

/// Database model for portfolios.
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
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<PortfolioDB> for Portfolio {
    fn from(db: PortfolioDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.user_id,
            name: db.name,
            created_at: db.created_at,
        }
    }
}

impl From<NewPortfolio> for PortfolioDB {
    fn from(domain: NewPortfolio) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            user_id: domain.owner_id,
            name: domain.name,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
