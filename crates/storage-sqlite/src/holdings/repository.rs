//! SQLite implementation of the holding repository.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::HoldingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::DieselErrorExt;
use crate::schema::holdings;
use lecapfolio_core::errors::Result;
use lecapfolio_core::holdings::{Holding, HoldingRepositoryTrait, HoldingUpdate};

pub struct SqliteHoldingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteHoldingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_row(
    conn: &mut SqliteConnection,
    holding_id: &str,
    owner_id: &str,
) -> Result<HoldingDB> {
    holdings::table
        .filter(holdings::id.eq(holding_id))
        .filter(holdings::user_id.eq(owner_id))
        .select(HoldingDB::as_select())
        .first::<HoldingDB>(conn)
        .map_err(|e| e.into_core_error())
}

#[async_trait]
impl HoldingRepositoryTrait for SqliteHoldingRepository {
    fn list(&self, owner_id: &str, portfolio_id: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        // fecha_finish is canonical YYYY-MM-DD text, so lexical order is
        // chronological order.
        let rows = holdings::table
            .filter(holdings::user_id.eq(owner_id))
            .filter(holdings::portfolio_id.eq(portfolio_id))
            .order((holdings::fecha_finish.asc(), holdings::id.asc()))
            .select(HoldingDB::as_select())
            .load::<HoldingDB>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(rows.into_iter().map(Holding::from).collect())
    }

    fn find_by_ticker(
        &self,
        owner_id: &str,
        portfolio_id: &str,
        ticker: &str,
    ) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = holdings::table
            .filter(holdings::user_id.eq(owner_id))
            .filter(holdings::portfolio_id.eq(portfolio_id))
            .filter(holdings::ticker.eq(ticker))
            .order((holdings::created_at.asc(), holdings::id.asc()))
            .select(HoldingDB::as_select())
            .load::<HoldingDB>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(rows.into_iter().map(Holding::from).collect())
    }

    fn get_by_id(&self, holding_id: &str, owner_id: &str) -> Result<Holding> {
        let mut conn = get_connection(&self.pool)?;
        load_row(&mut conn, holding_id, owner_id).map(Holding::from)
    }

    async fn insert(&self, holding: Holding) -> Result<Holding> {
        let db_model = HoldingDB::from_domain(holding);

        self.writer
            .exec(move |conn| {
                diesel::insert_into(holdings::table)
                    .values(&db_model)
                    .returning(HoldingDB::as_returning())
                    .get_result::<HoldingDB>(conn)
                    .map(Holding::from)
                    .map_err(|e| e.into_core_error())
            })
            .await
    }

    async fn update(
        &self,
        holding_id: &str,
        owner_id: &str,
        update: HoldingUpdate,
    ) -> Result<Holding> {
        let holding_id = holding_id.to_string();
        let owner_id = owner_id.to_string();

        self.writer
            .exec(move |conn| {
                let existing = load_row(conn, &holding_id, &owner_id)?;
                let created_at = existing.created_at;

                let updated = Holding::from(existing).with_update(&update);
                let row = HoldingDB::from_domain_at(updated, created_at);

                diesel::update(holdings::table.filter(holdings::id.eq(&holding_id)))
                    .set(&row)
                    .returning(HoldingDB::as_returning())
                    .get_result::<HoldingDB>(conn)
                    .map(Holding::from)
                    .map_err(|e| e.into_core_error())
            })
            .await
    }

    async fn delete(&self, holding_id: &str, owner_id: &str) -> Result<usize> {
        let holding_id = holding_id.to_string();
        let owner_id = owner_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::delete(
                    holdings::table
                        .filter(holdings::id.eq(&holding_id))
                        .filter(holdings::user_id.eq(&owner_id)),
                )
                .execute(conn)
                .map_err(|e| e.into_core_error())
            })
            .await
    }

    async fn delete_many(&self, holding_ids: &[String], owner_id: &str) -> Result<usize> {
        let holding_ids = holding_ids.to_vec();
        let owner_id = owner_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::delete(
                    holdings::table
                        .filter(holdings::id.eq_any(&holding_ids))
                        .filter(holdings::user_id.eq(&owner_id)),
                )
                .execute(conn)
                .map_err(|e| e.into_core_error())
            })
            .await
    }
}
