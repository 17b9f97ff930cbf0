//! View models and templates for the admin screens.

use askama::Template;

/// Inline notice shown after a form submission.
#[derive(Debug, Clone)]
pub struct AdminNotice {
    pub kind: &'static str,
    pub text: String,
}

impl AdminNotice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: "success",
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: "error",
            text: text.into(),
        }
    }
}

/// One row of the post list table.
#[derive(Debug, Clone)]
pub struct AdminPostRowView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status_label: &'static str,
    /// "Yes" for flagged posts, an em dash otherwise.
    pub flag_label: String,
    pub edit_href: String,
    pub quick_edit_token: String,
}

pub struct AdminPostListView {
    pub rows: Vec<AdminPostRowView>,
    /// `{ "<post-id>": "yes" | "no" }` island for quick-edit hydration.
    pub hydration_json: String,
    pub notice: Option<AdminNotice>,
}

#[derive(Template)]
#[template(path = "admin/posts.html")]
pub struct AdminPostsTemplate {
    pub view: AdminPostListView,
}

/// The post editor page: the slider side panel is the only part this
/// service owns.
pub struct AdminPostEditView {
    pub id: String,
    pub title: String,
    pub flag_is_yes: bool,
    pub panel_token: String,
    pub notice: Option<AdminNotice>,
}

#[derive(Template)]
#[template(path = "admin/post_edit.html")]
pub struct AdminPostEditTemplate {
    pub view: AdminPostEditView,
}

/// Settings form values, already formatted for the inputs.
pub struct AdminSettingsView {
    pub post_count: String,
    pub mount_hook: String,
    pub margin_top: String,
    pub margin_bottom: String,
    pub click_behavior: &'static str,
    pub autoplay_enabled: bool,
    pub autoplay_delay_ms: String,
    pub form_token: String,
    pub notice: Option<AdminNotice>,
}

impl AdminSettingsView {
    pub fn click_is(&self, value: &str) -> bool {
        self.click_behavior == value
    }
}

#[derive(Template)]
#[template(path = "admin/settings.html")]
pub struct AdminSettingsTemplate {
    pub view: AdminSettingsView,
}
