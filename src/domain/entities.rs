//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::types::{ClickBehavior, PostStatus};

/// A post as owned by the content store. Vetrina reads posts; it never
/// creates or edits them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub thumbnail_url: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl PostRecord {
    pub fn permalink(&self) -> String {
        format!("/posts/{}", self.slug)
    }
}

/// Display settings for the homepage showcase, one row per deployment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowcaseSettingsRecord {
    pub post_count: i32,
    pub mount_hook: String,
    pub margin_top: i32,
    pub margin_bottom: i32,
    pub click_behavior: ClickBehavior,
    pub autoplay_enabled: bool,
    pub autoplay_delay_ms: i32,
    pub updated_at: Option<OffsetDateTime>,
}

impl Default for ShowcaseSettingsRecord {
    fn default() -> Self {
        Self {
            post_count: defaults::POST_COUNT,
            mount_hook: defaults::MOUNT_HOOK.to_string(),
            margin_top: defaults::MARGIN_TOP,
            margin_bottom: defaults::MARGIN_BOTTOM,
            click_behavior: ClickBehavior::EntireSlide,
            autoplay_enabled: defaults::AUTOPLAY_ENABLED,
            autoplay_delay_ms: defaults::AUTOPLAY_DELAY_MS,
            updated_at: None,
        }
    }
}

/// Documented defaults, also returned when the settings row was never
/// written.
pub mod defaults {
    pub const POST_COUNT: i32 = 5;
    pub const MOUNT_HOOK: &str = "generate_after_header";
    pub const MARGIN_TOP: i32 = 20;
    pub const MARGIN_BOTTOM: i32 = 20;
    pub const AUTOPLAY_ENABLED: bool = true;
    pub const AUTOPLAY_DELAY_MS: i32 = 5000;
}
