use async_trait::async_trait;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{PostsRepo, RepoError},
    domain::entities::PostRecord,
    domain::flags::{STICKY_FLAG_KEY, STICKY_FLAG_YES},
    domain::types::PostStatus,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    slug: String,
    title: String,
    excerpt: String,
    thumbnail_url: Option<String>,
    status: PostStatus,
    published_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            excerpt: row.excerpt,
            thumbnail_url: row.thumbnail_url,
            status: row.status,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const POST_COLUMNS: &str = "p.id, p.slug, p.title, p.excerpt, p.thumbnail_url, \
     p.status, p.published_at, p.created_at, p.updated_at";

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_flagged_posts(&self, limit: u32) -> Result<Vec<PostRecord>, RepoError> {
        let sql = format!(
            "SELECT {POST_COLUMNS}
             FROM posts p
             INNER JOIN post_meta m
                ON m.post_id = p.id
               AND m.meta_key = $1
               AND m.meta_value = $2
             WHERE p.status = 'published'::post_status
               AND p.published_at IS NOT NULL
             ORDER BY p.published_at DESC
             LIMIT $3"
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(STICKY_FLAG_KEY)
            .bind(STICKY_FLAG_YES)
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn list_recent_posts(&self, limit: u32) -> Result<Vec<PostRecord>, RepoError> {
        let sql = format!(
            "SELECT {POST_COLUMNS}
             FROM posts p
             ORDER BY p.updated_at DESC
             LIMIT $1"
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let sql = format!(
            "SELECT {POST_COLUMNS}
             FROM posts p
             WHERE p.id = $1"
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }
}
