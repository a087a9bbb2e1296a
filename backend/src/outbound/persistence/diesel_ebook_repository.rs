//! PostgreSQL-backed `EbookRepository`.
//!
//! Each ebook is a JSONB document keyed by `id`, with `category` copied into
//! an indexed column. Partial updates merge a JSON patch into the stored
//! document in a single `UPDATE ... RETURNING`, so concurrent writers never
//! lose each other's fields.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Jsonb, Nullable, Text};
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use serde_json::Value;

use crate::domain::ports::{EbookRepository, EbookRepositoryError};
use crate::domain::{Category, Ebook, EbookChanges, EbookId};

use super::diesel_error_mapping::{map_decode_error, map_diesel_error, map_pool_error};
use super::models::{EbookRow, NewEbookRow};
use super::pool::DbPool;
use super::schema::ebooks;

/// `$1` is the document patch, `$2` the new category (or NULL), `$3` the id.
const UPDATE_SQL: &str = r#"
UPDATE ebooks
SET document = document || $1,
    category = COALESCE($2, category)
WHERE id = $3
RETURNING id, category, document
"#;

/// Diesel implementation of [`EbookRepository`].
#[derive(Clone)]
pub struct DieselEbookRepository {
    pool: DbPool,
}

impl DieselEbookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn decode_rows(rows: Vec<EbookRow>) -> Result<Vec<Ebook>, EbookRepositoryError> {
    rows.into_iter()
        .map(|row| Ebook::try_from(row).map_err(map_decode_error))
        .collect()
}

#[async_trait]
impl EbookRepository for DieselEbookRepository {
    async fn get_by_id(&self, id: EbookId) -> Result<Option<Ebook>, EbookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ebooks::table
            .find(id.get())
            .select(EbookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "fetch ebook"))?;
        row.map(Ebook::try_from)
            .transpose()
            .map_err(map_decode_error)
    }

    async fn put(&self, ebook: &Ebook) -> Result<(), EbookRepositoryError> {
        let row = NewEbookRow::from_domain(ebook).map_err(map_decode_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(ebooks::table)
            .values(&row)
            .on_conflict(ebooks::id)
            .do_update()
            .set((
                ebooks::category.eq(excluded(ebooks::category)),
                ebooks::document.eq(excluded(ebooks::document)),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "store ebook"))?;
        Ok(())
    }

    async fn update_fields(
        &self,
        id: EbookId,
        changes: &EbookChanges,
    ) -> Result<Ebook, EbookRepositoryError> {
        let patch = Value::Object(changes.to_document_patch());
        let category = changes.category.as_ref().map(Category::as_str);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<EbookRow> = sql_query(UPDATE_SQL)
            .bind::<Jsonb, _>(patch)
            .bind::<Nullable<Text>, _>(category)
            .bind::<BigInt, _>(id.get())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "update ebook"))?;

        match row {
            Some(row) => Ebook::try_from(row).map_err(map_decode_error),
            None => Err(EbookRepositoryError::not_found(id.get())),
        }
    }

    async fn scan_all(&self) -> Result<Vec<Ebook>, EbookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = ebooks::table
            .order(ebooks::id.asc())
            .select(EbookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "scan ebooks"))?;
        decode_rows(rows)
    }

    async fn query_by_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Ebook>, EbookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = ebooks::table
            .filter(ebooks::category.eq(category.as_str()))
            .order(ebooks::id.asc())
            .select(EbookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "query ebooks by category"))?;
        decode_rows(rows)
    }
}

