//! Shared domain enumerations aligned with persisted database values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "post_status", rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

/// Which part of a rendered slide acts as a link.
///
/// Stored as plain text; any unrecognized stored value falls back to
/// `EntireSlide` at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickBehavior {
    #[default]
    EntireSlide,
    TitleOnly,
    ReadMore,
}

impl ClickBehavior {
    pub fn as_str(self) -> &'static str {
        match self {
            ClickBehavior::EntireSlide => "entire_slide",
            ClickBehavior::TitleOnly => "title_only",
            ClickBehavior::ReadMore => "read_more",
        }
    }

    pub fn try_parse(value: &str) -> Option<Self> {
        match value {
            "entire_slide" => Some(ClickBehavior::EntireSlide),
            "title_only" => Some(ClickBehavior::TitleOnly),
            "read_more" => Some(ClickBehavior::ReadMore),
            _ => None,
        }
    }

    /// Exact-match parse with the documented fallback.
    pub fn parse_or_default(value: &str) -> Self {
        Self::try_parse(value).unwrap_or_default()
    }
}

/// Layout slot the showcase fragment mounts into.
///
/// The stored `mount_hook` setting is free text; only identifiers the
/// bundled layout answers to resolve to a slot. Anything else leaves the
/// showcase unmounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountPoint {
    AfterHeader,
    BeforeFooter,
}

impl MountPoint {
    pub fn resolve(hook: &str) -> Option<Self> {
        match hook.trim() {
            "generate_after_header" | "after_header" => Some(MountPoint::AfterHeader),
            "generate_before_footer" | "before_footer" => Some(MountPoint::BeforeFooter),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_behavior_falls_back_to_entire_slide() {
        assert_eq!(
            ClickBehavior::parse_or_default("read_more"),
            ClickBehavior::ReadMore
        );
        assert_eq!(
            ClickBehavior::parse_or_default("banner_only"),
            ClickBehavior::EntireSlide
        );
        assert_eq!(
            ClickBehavior::parse_or_default(""),
            ClickBehavior::EntireSlide
        );
    }

    #[test]
    fn mount_point_resolves_known_hooks_only() {
        assert_eq!(
            MountPoint::resolve("generate_after_header"),
            Some(MountPoint::AfterHeader)
        );
        assert_eq!(
            MountPoint::resolve("  before_footer "),
            Some(MountPoint::BeforeFooter)
        );
        assert_eq!(MountPoint::resolve("generate_sidebar"), None);
        assert_eq!(MountPoint::resolve(""), None);
    }
}
