use crate::database::DbError;
use crate::database::album::album::{Album, AlbumWithCount};
use crate::database::album::album_share::{AlbumShare, SharePermission};
use crate::database::photo::Photo;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct AlbumStore;

impl AlbumStore {
    //================================================================================
    // Core Album Management
    //================================================================================

    /// Creates a new album. Albums start private and tokenless.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        owner_id: i32,
        title: &str,
        description: Option<String>,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            INSERT INTO album (id, owner_id, title, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(album_id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_one(executor)
        .await?)
    }

    /// Updates the details of a specific album.
    /// Patches the album. `title` never becomes NULL, so an absent title
    /// keeps the old one; `description` and `cover_photo_id` carry an
    /// outer level that distinguishes "leave alone" from "clear to NULL".
    pub async fn update(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        title: Option<String>,
        description: Option<Option<String>>,
        cover_photo_id: Option<Option<String>>,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            UPDATE album
            SET
                title = COALESCE($1, title),
                description = CASE WHEN $2 THEN $3 ELSE description END,
                cover_photo_id = CASE WHEN $4 THEN $5 ELSE cover_photo_id END,
                updated_at = now()
            WHERE id = $6
            RETURNING *
            ",
        )
        .bind(title)
        .bind(description.is_some())
        .bind(description.flatten())
        .bind(cover_photo_id.is_some())
        .bind(cover_photo_id.flatten())
        .bind(album_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<Option<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>("SELECT * FROM album WHERE id = $1")
            .bind(album_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn find_by_public_token(
        executor: impl Executor<'_, Database = Postgres>,
        token: &str,
    ) -> Result<Option<Album>, DbError> {
        Ok(
            sqlx::query_as::<_, Album>("SELECT * FROM album WHERE public_token = $1")
                .bind(token)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM album WHERE id = $1")
            .bind(album_id)
            .execute(executor)
            .await?)
    }

    /// Albums owned by the user, newest activity first.
    pub async fn list_owned(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Vec<AlbumWithCount>, DbError> {
        Ok(sqlx::query_as::<_, AlbumWithCount>(
            r"
            SELECT a.*,
                   (SELECT COUNT(*) FROM album_photo ap WHERE ap.album_id = a.id) AS photo_count
            FROM album a
            WHERE a.owner_id = $1
            ORDER BY a.updated_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    /// Albums shared with the user via a live (non-expired) grant matching
    /// their email or username.
    pub async fn list_shared_with(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        username: &str,
    ) -> Result<Vec<AlbumWithCount>, DbError> {
        Ok(sqlx::query_as::<_, AlbumWithCount>(
            r"
            SELECT a.*,
                   (SELECT COUNT(*) FROM album_photo ap WHERE ap.album_id = a.id) AS photo_count
            FROM album a
            WHERE EXISTS (
                SELECT 1
                FROM album_share s
                WHERE s.album_id = a.id
                  AND (s.grantee_email = $1 OR s.grantee_username = $2)
                  AND (s.expires_at IS NULL OR s.expires_at > now())
            )
            ORDER BY a.updated_at DESC
            ",
        )
        .bind(email)
        .bind(username)
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Album Membership Management
    //================================================================================

    /// Adds multiple photos to an album; duplicates are ignored.
    ///
    /// Returns the number of rows actually inserted.
    pub async fn add_photos(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        photo_ids: &[String],
        added_by_user_id: i32,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            r"
            INSERT INTO album_photo (album_id, photo_id, added_by)
            SELECT $1, item_id, $2
            FROM UNNEST($3::TEXT[]) AS item_id
            ON CONFLICT (album_id, photo_id) DO NOTHING
            ",
        )
        .bind(album_id)
        .bind(added_by_user_id)
        .bind(photo_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn remove_photo(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        photo_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM album_photo WHERE album_id = $1 AND photo_id = $2")
                .bind(album_id)
                .bind(photo_id)
                .execute(executor)
                .await?,
        )
    }

    pub async fn is_member(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        photo_id: &str,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM album_photo WHERE album_id = $1 AND photo_id = $2",
        )
        .bind(album_id)
        .bind(photo_id)
        .fetch_optional(executor)
        .await?
        .is_some())
    }

    /// All member photos of an album, most recently added first.
    pub async fn list_photos(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            SELECT p.*
            FROM album_photo ap
            JOIN photo p ON ap.photo_id = p.id
            WHERE ap.album_id = $1
            ORDER BY ap.added_at DESC, p.id
            ",
        )
        .bind(album_id)
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Share Management
    //================================================================================

    /// Adds a share for a grantee, or overwrites the existing one
    /// (latest share wins).
    pub async fn upsert_share(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        grantee_email: Option<String>,
        grantee_username: Option<String>,
        permission: SharePermission,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<AlbumShare, DbError> {
        Ok(sqlx::query_as::<_, AlbumShare>(
            r"
            INSERT INTO album_share (album_id, grantee_email, grantee_username, permission, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (album_id, grantee_email, grantee_username)
                DO UPDATE SET permission = EXCLUDED.permission,
                              expires_at = EXCLUDED.expires_at,
                              created_at = now()
            RETURNING *
            ",
        )
        .bind(album_id)
        .bind(grantee_email)
        .bind(grantee_username)
        .bind(permission)
        .bind(expires_at)
        .fetch_one(executor)
        .await?)
    }

    pub async fn list_shares(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<Vec<AlbumShare>, DbError> {
        Ok(
            sqlx::query_as::<_, AlbumShare>("SELECT * FROM album_share WHERE album_id = $1")
                .bind(album_id)
                .fetch_all(executor)
                .await?,
        )
    }

    //================================================================================
    // Public Token Management
    //================================================================================

    /// Installs a fresh public token, implicitly invalidating any previous
    /// one by overwrite.
    pub async fn set_public_token(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            UPDATE album
            SET public_token = $1,
                public_expires_at = $2,
                is_public = TRUE,
                updated_at = now()
            WHERE id = $3
            RETURNING *
            ",
        )
        .bind(token)
        .bind(expires_at)
        .bind(album_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn clear_public_token(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query(
            r"
            UPDATE album
            SET public_token = NULL,
                public_expires_at = NULL,
                is_public = FALSE,
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(album_id)
        .execute(executor)
        .await?)
    }
}
