use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    application::repos::{FlagsRepo, RepoError},
    domain::flags::STICKY_FLAG_KEY,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(FromRow)]
struct FlagRow {
    post_id: Uuid,
    meta_value: String,
}

#[async_trait]
impl FlagsRepo for PostgresRepositories {
    async fn load_flag(&self, post_id: Uuid) -> Result<Option<String>, RepoError> {
        let value: Option<(String,)> = sqlx::query_as(
            "SELECT meta_value
             FROM post_meta
             WHERE post_id = $1 AND meta_key = $2",
        )
        .bind(post_id)
        .bind(STICKY_FLAG_KEY)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(value.map(|(v,)| v))
    }

    async fn load_flags(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, String>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, FlagRow>(
            "SELECT post_id, meta_value
             FROM post_meta
             WHERE meta_key = $1 AND post_id = ANY($2)",
        )
        .bind(STICKY_FLAG_KEY)
        .bind(post_ids)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.post_id, row.meta_value))
            .collect())
    }

    async fn set_flag(&self, post_id: Uuid, value: &str) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO post_meta (post_id, meta_key, meta_value)
             VALUES ($1, $2, $3)
             ON CONFLICT (post_id, meta_key) DO UPDATE SET meta_value = EXCLUDED.meta_value",
        )
        .bind(post_id)
        .bind(STICKY_FLAG_KEY)
        .bind(value)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn clear_flag(&self, post_id: Uuid) -> Result<(), RepoError> {
        sqlx::query(
            "DELETE FROM post_meta
             WHERE post_id = $1 AND meta_key = $2",
        )
        .bind(post_id)
        .bind(STICKY_FLAG_KEY)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
