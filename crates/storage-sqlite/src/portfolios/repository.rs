//! SQLite implementation of the portfolio repository.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::model::PortfolioDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::DieselErrorExt;
use crate::schema::portfolios;
use lecapfolio_core::errors::Result;
use lecapfolio_core::portfolios::{NewPortfolio, Portfolio, PortfolioRepositoryTrait};

pub struct SqlitePortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqlitePortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for SqlitePortfolioRepository {
    async fn create(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        let mut db_model = PortfolioDB::from(new_portfolio);
        if db_model.id.is_empty() {
            db_model.id = uuid::Uuid::new_v4().to_string();
        }

        self.writer
            .exec(move |conn| {
                diesel::insert_into(portfolios::table)
                    .values(&db_model)
                    .returning(PortfolioDB::as_returning())
                    .get_result::<PortfolioDB>(conn)
                    .map(Portfolio::from)
                    .map_err(|e| e.into_core_error())
            })
            .await
    }

    fn get_by_id(&self, portfolio_id: &str, owner_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;

        portfolios::table
            .filter(portfolios::id.eq(portfolio_id))
            .filter(portfolios::user_id.eq(owner_id))
            .select(PortfolioDB::as_select())
            .first::<PortfolioDB>(&mut conn)
            .map(Portfolio::from)
            .map_err(|e| e.into_core_error())
    }

    fn list(&self, owner_id: &str) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = portfolios::table
            .filter(portfolios::user_id.eq(owner_id))
            .order((portfolios::created_at.asc(), portfolios::id.asc()))
            .select(PortfolioDB::as_select())
            .load::<PortfolioDB>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(rows.into_iter().map(Portfolio::from).collect())
    }
}
