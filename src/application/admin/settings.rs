//! Showcase settings administration.
//!
//! Every write goes through the sanitizers: malformed input is coerced,
//! never rejected. Non-numeric integer input becomes zero before the
//! field's clamp applies.

use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;

use crate::application::repos::{RepoError, SettingsRepo};
use crate::domain::entities::{ShowcaseSettingsRecord, defaults};
use crate::domain::types::ClickBehavior;

const POST_COUNT_MIN: i32 = 1;
const POST_COUNT_MAX: i32 = 20;
const AUTOPLAY_DELAY_MIN_MS: i32 = 1000;

#[derive(Debug, Error)]
pub enum AdminSettingsError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Raw form values as submitted; sanitization happens here, on every write.
#[derive(Debug, Clone)]
pub struct UpdateShowcaseSettingsCommand {
    pub post_count: String,
    pub mount_hook: String,
    pub margin_top: String,
    pub margin_bottom: String,
    pub click_behavior: String,
    pub autoplay_enabled: bool,
    pub autoplay_delay_ms: String,
}

#[derive(Clone)]
pub struct AdminShowcaseSettingsService {
    repo: Arc<dyn SettingsRepo>,
}

impl AdminShowcaseSettingsService {
    pub fn new(repo: Arc<dyn SettingsRepo>) -> Self {
        Self { repo }
    }

    pub async fn load(&self) -> Result<ShowcaseSettingsRecord, AdminSettingsError> {
        self.repo
            .load_showcase_settings()
            .await
            .map_err(AdminSettingsError::from)
    }

    pub async fn update(
        &self,
        command: UpdateShowcaseSettingsCommand,
    ) -> Result<ShowcaseSettingsRecord, AdminSettingsError> {
        let mut record = self.repo.load_showcase_settings().await?;

        record.post_count = sanitize_post_count(&command.post_count);
        record.mount_hook = sanitize_hook_name(&command.mount_hook);
        record.margin_top = sanitize_px(&command.margin_top);
        record.margin_bottom = sanitize_px(&command.margin_bottom);
        record.click_behavior = sanitize_click_behavior(&command.click_behavior);
        record.autoplay_enabled = command.autoplay_enabled;
        record.autoplay_delay_ms = sanitize_autoplay_delay(&command.autoplay_delay_ms);
        record.updated_at = Some(OffsetDateTime::now_utc());

        self.repo.upsert_showcase_settings(record).await?;
        let latest = self.repo.load_showcase_settings().await?;
        Ok(latest)
    }
}

/// Non-negative integer coercion: anything unparseable or negative is zero.
fn coerce_non_negative(value: &str) -> i32 {
    value.trim().parse::<i64>().unwrap_or(0).clamp(0, i32::MAX as i64) as i32
}

pub fn sanitize_post_count(value: &str) -> i32 {
    coerce_non_negative(value).clamp(POST_COUNT_MIN, POST_COUNT_MAX)
}

pub fn sanitize_px(value: &str) -> i32 {
    coerce_non_negative(value)
}

pub fn sanitize_hook_name(value: &str) -> String {
    value.trim().to_string()
}

/// Unknown click-behavior strings are coerced to the default at write time;
/// the renderer keeps its own fallback for values stored by other means.
pub fn sanitize_click_behavior(value: &str) -> ClickBehavior {
    ClickBehavior::parse_or_default(value.trim())
}

pub fn sanitize_autoplay_delay(value: &str) -> i32 {
    let coerced = coerce_non_negative(value);
    if coerced == 0 {
        defaults::AUTOPLAY_DELAY_MS
    } else {
        coerced.max(AUTOPLAY_DELAY_MIN_MS)
    }
}
