use crate::database::DbError;
use crate::database::app_user::User;
use sqlx::{Executor, Postgres};

pub struct UserStore;

impl UserStore {
    /// Creates a new user resolved from an identity-provider credential.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        auth_provider_id: &str,
        username: &str,
        email: &str,
        display_name: &str,
        avatar_url: Option<String>,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (auth_provider_id, username, email, display_name, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(auth_provider_id)
        .bind(username)
        .bind(email)
        .bind(display_name)
        .bind(avatar_url)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM app_user WHERE id = $1")
                .bind(user_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn find_by_provider_id(
        executor: impl Executor<'_, Database = Postgres>,
        auth_provider_id: &str,
    ) -> Result<Option<User>, DbError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM app_user WHERE auth_provider_id = $1")
                .bind(auth_provider_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn username_taken(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, i32>("SELECT 1 FROM app_user WHERE username = $1")
                .bind(username)
                .fetch_optional(executor)
                .await?
                .is_some(),
        )
    }

    /// Updates a user's mutable profile fields.
    ///
    /// Pass `None` for fields that should remain unchanged.
    pub async fn update_profile(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        display_name: Option<String>,
        avatar_url: Option<String>,
        profile: Option<serde_json::Value>,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            UPDATE app_user
            SET
                display_name = COALESCE($1, display_name),
                avatar_url = COALESCE($2, avatar_url),
                profile = COALESCE($3, profile),
                updated_at = now()
            WHERE id = $4
            RETURNING *
            ",
        )
        .bind(display_name)
        .bind(avatar_url)
        .bind(profile)
        .bind(user_id)
        .fetch_one(executor)
        .await?)
    }
}
