use async_trait::async_trait;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::{
    application::repos::{RepoError, SettingsRepo},
    domain::entities::ShowcaseSettingsRecord,
    domain::types::ClickBehavior,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(FromRow)]
struct ShowcaseSettingsRow {
    post_count: i32,
    mount_hook: String,
    margin_top: i32,
    margin_bottom: i32,
    click_behavior: String,
    autoplay_enabled: bool,
    autoplay_delay_ms: i32,
    updated_at: Option<OffsetDateTime>,
}

impl From<ShowcaseSettingsRow> for ShowcaseSettingsRecord {
    fn from(row: ShowcaseSettingsRow) -> Self {
        Self {
            post_count: row.post_count,
            mount_hook: row.mount_hook,
            margin_top: row.margin_top,
            margin_bottom: row.margin_bottom,
            // Stored as text; unrecognized values keep the render fallback.
            click_behavior: ClickBehavior::parse_or_default(&row.click_behavior),
            autoplay_enabled: row.autoplay_enabled,
            autoplay_delay_ms: row.autoplay_delay_ms,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SettingsRepo for PostgresRepositories {
    async fn load_showcase_settings(&self) -> Result<ShowcaseSettingsRecord, RepoError> {
        let row = sqlx::query_as::<_, ShowcaseSettingsRow>(
            "SELECT post_count,
                    mount_hook,
                    margin_top,
                    margin_bottom,
                    click_behavior,
                    autoplay_enabled,
                    autoplay_delay_ms,
                    updated_at
             FROM showcase_settings
             WHERE id = 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        // A missing row reads as the documented defaults.
        Ok(row
            .map(ShowcaseSettingsRecord::from)
            .unwrap_or_default())
    }

    async fn upsert_showcase_settings(
        &self,
        settings: ShowcaseSettingsRecord,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO showcase_settings (
                 id,
                 post_count,
                 mount_hook,
                 margin_top,
                 margin_bottom,
                 click_behavior,
                 autoplay_enabled,
                 autoplay_delay_ms,
                 updated_at
             ) VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                 post_count = EXCLUDED.post_count,
                 mount_hook = EXCLUDED.mount_hook,
                 margin_top = EXCLUDED.margin_top,
                 margin_bottom = EXCLUDED.margin_bottom,
                 click_behavior = EXCLUDED.click_behavior,
                 autoplay_enabled = EXCLUDED.autoplay_enabled,
                 autoplay_delay_ms = EXCLUDED.autoplay_delay_ms,
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(settings.post_count)
        .bind(&settings.mount_hook)
        .bind(settings.margin_top)
        .bind(settings.margin_bottom)
        .bind(settings.click_behavior.as_str())
        .bind(settings.autoplay_enabled)
        .bind(settings.autoplay_delay_ms)
        .bind(settings.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
