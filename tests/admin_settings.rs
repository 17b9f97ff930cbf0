//! Settings store semantics: defaults for never-set keys and sanitizers on
//! every write.

mod common;

use vetrina::application::admin::settings::UpdateShowcaseSettingsCommand;
use vetrina::domain::entities::{ShowcaseSettingsRecord, defaults};
use vetrina::domain::types::ClickBehavior;

use common::build_app;

fn command() -> UpdateShowcaseSettingsCommand {
    UpdateShowcaseSettingsCommand {
        post_count: "5".to_string(),
        mount_hook: "generate_after_header".to_string(),
        margin_top: "20".to_string(),
        margin_bottom: "20".to_string(),
        click_behavior: "entire_slide".to_string(),
        autoplay_enabled: true,
        autoplay_delay_ms: "5000".to_string(),
    }
}

#[tokio::test]
async fn never_set_settings_read_as_documented_defaults() {
    let app = build_app();
    let record = app.admin_state.settings.load().await.expect("load settings");

    assert_eq!(record, ShowcaseSettingsRecord::default());
    assert_eq!(record.post_count, 5);
    assert_eq!(record.mount_hook, "generate_after_header");
    assert_eq!(record.margin_top, 20);
    assert_eq!(record.margin_bottom, 20);
    assert_eq!(record.click_behavior, ClickBehavior::EntireSlide);
    assert!(record.autoplay_enabled);
    assert_eq!(record.autoplay_delay_ms, defaults::AUTOPLAY_DELAY_MS);
}

#[tokio::test]
async fn negative_margin_stores_as_zero() {
    let app = build_app();
    let mut cmd = command();
    cmd.margin_top = "-5".to_string();

    let updated = app
        .admin_state
        .settings
        .update(cmd)
        .await
        .expect("update settings");
    assert_eq!(updated.margin_top, 0);

    let reloaded = app.admin_state.settings.load().await.expect("reload");
    assert_eq!(reloaded.margin_top, 0);
}

#[tokio::test]
async fn out_of_range_and_malformed_values_are_clamped_not_rejected() {
    let app = build_app();
    let mut cmd = command();
    cmd.post_count = "250".to_string();
    cmd.margin_bottom = "not-a-number".to_string();
    cmd.autoplay_delay_ms = "250".to_string();
    cmd.click_behavior = "banner_only".to_string();
    cmd.mount_hook = "  custom_hook  ".to_string();

    let updated = app
        .admin_state
        .settings
        .update(cmd)
        .await
        .expect("update settings");

    assert_eq!(updated.post_count, 20);
    assert_eq!(updated.margin_bottom, 0);
    assert_eq!(updated.autoplay_delay_ms, 1000);
    assert_eq!(updated.click_behavior, ClickBehavior::EntireSlide);
    assert_eq!(updated.mount_hook, "custom_hook");
}

#[tokio::test]
async fn write_then_read_returns_the_sanitized_values() {
    let app = build_app();
    let mut cmd = command();
    cmd.post_count = "7".to_string();
    cmd.click_behavior = "read_more".to_string();
    cmd.autoplay_enabled = false;

    app.admin_state
        .settings
        .update(cmd)
        .await
        .expect("update settings");

    let reloaded = app.admin_state.settings.load().await.expect("reload");
    assert_eq!(reloaded.post_count, 7);
    assert_eq!(reloaded.click_behavior, ClickBehavior::ReadMore);
    assert!(!reloaded.autoplay_enabled);
    assert!(reloaded.updated_at.is_some());
}
