use crate::database::DbError;
use crate::database::photo::{Photo, PhotoStats};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct PhotoStore;

impl PhotoStore {
    /// Creates the provisional metadata row for an upload-intent.
    ///
    /// The backing object may not exist in storage yet; the row is
    /// authoritative regardless.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: &str,
        user_id: i32,
        storage_key: &str,
        original_name: &str,
        mime_type: &str,
        file_size: i64,
        width: Option<i32>,
        height: Option<i32>,
        taken_at: Option<DateTime<Utc>>,
        metadata: serde_json::Value,
    ) -> Result<Photo, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            INSERT INTO photo
                (id, user_id, storage_key, original_name, mime_type, file_size,
                 width, height, taken_at, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            ",
        )
        .bind(photo_id)
        .bind(user_id)
        .bind(storage_key)
        .bind(original_name)
        .bind(mime_type)
        .bind(file_size)
        .bind(width)
        .bind(height)
        .bind(taken_at)
        .bind(metadata)
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves a photo only if it belongs to `user_id`.
    pub async fn find_owned(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: &str,
        user_id: i32,
    ) -> Result<Option<Photo>, DbError> {
        Ok(
            sqlx::query_as::<_, Photo>("SELECT * FROM photo WHERE id = $1 AND user_id = $2")
                .bind(photo_id)
                .bind(user_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Lists a user's photos, newest first, optionally bounded by an
    /// upload-time range.
    pub async fn list_by_owner(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            SELECT *
            FROM photo
            WHERE user_id = $1
              AND ($2::TIMESTAMPTZ IS NULL OR uploaded_at >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR uploaded_at < $3)
            ORDER BY uploaded_at DESC
            ",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?)
    }

    /// Filters `photo_ids` down to the ones that exist and belong to `user_id`.
    pub async fn filter_owned_ids(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        photo_ids: &[String],
    ) -> Result<Vec<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>(
            "SELECT id FROM photo WHERE id = ANY($1) AND user_id = $2",
        )
        .bind(photo_ids)
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    /// Deletes the metadata row. Album memberships cascade away with it.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM photo WHERE id = $1")
            .bind(photo_id)
            .execute(executor)
            .await?)
    }

    /// Aggregate count / size / upload-time bounds for one user.
    pub async fn stats(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<PhotoStats, DbError> {
        Ok(sqlx::query_as::<_, PhotoStats>(
            r"
            SELECT
                COUNT(*)                            AS photo_count,
                COALESCE(SUM(file_size), 0)::BIGINT AS total_bytes,
                MIN(uploaded_at)                    AS first_uploaded_at,
                MAX(uploaded_at)                    AS last_uploaded_at
            FROM photo
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await?)
    }
}
