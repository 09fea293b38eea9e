//! PostgreSQL implementation of [`Store`], shared by every record type

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{Arguments, Pool, Postgres};

use super::{query, Fields, Record, Store};
use crate::{
    error::{AppError, AppResult},
    models::PageRequest,
};

pub struct PgStore<E> {
    pool: Pool<Postgres>,
    _record: PhantomData<fn() -> E>,
}

impl<E> PgStore<E> {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    pub(crate) fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

impl<E> Clone for PgStore<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[async_trait]
impl<E: Record> Store<E> for PgStore<E> {
    async fn list(&self, page: PageRequest, filter: Fields) -> AppResult<(Vec<E>, i64)> {
        let where_sql = query::where_clause(&filter.equalities(1));

        let count_sql = query::count_sql(E::TABLE, &where_sql);
        let total = sqlx::query_scalar_with::<_, i64, _>(&count_sql, filter.arguments())
            .fetch_one(&self.pool)
            .await?;

        let page_sql = query::page_sql(E::TABLE, &where_sql, page);
        let rows = sqlx::query_as_with::<_, E, _>(&page_sql, filter.arguments())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<E>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", E::TABLE);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<E>> {
        let sql = format!("SELECT * FROM {} WHERE {} = $1", E::TABLE, E::KEY_COLUMN);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn search(&self, keyword: &str, page: PageRequest) -> AppResult<(Vec<E>, i64)> {
        let where_sql = query::where_clause(&[query::search_condition(E::SEARCH_COLUMNS, 1)]);
        let pattern = query::like_pattern(keyword);

        let count_sql = query::count_sql(E::TABLE, &where_sql);
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(pattern.as_str())
            .fetch_one(&self.pool)
            .await?;

        let page_sql = query::page_sql(E::TABLE, &where_sql, page);
        let rows = sqlx::query_as::<_, E>(&page_sql)
            .bind(pattern.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    async fn create(&self, fields: Fields) -> AppResult<E> {
        let sql = query::insert_sql(E::TABLE, &fields);
        let id = sqlx::query_scalar_with::<_, i32, _>(&sql, fields.arguments())
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(table = E::TABLE, id, "row inserted");

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(format!("{} {} could not be read back after insert", E::LABEL, id))
        })
    }

    async fn update(&self, id: i32, fields: Fields) -> AppResult<Option<E>> {
        if fields.is_empty() {
            return self.find_by_id(id).await;
        }

        let sql = query::update_sql(E::TABLE, &fields);
        let mut args = fields.arguments();
        args.add(id);

        let result = sqlx::query_with(&sql, args).execute(&self.pool).await?;
        tracing::debug!(
            table = E::TABLE,
            id,
            columns = ?fields.columns(),
            rows = result.rows_affected(),
            "row updated"
        );

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
