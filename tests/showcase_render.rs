//! Showcase rendering properties: markup layouts per click behavior, the
//! empty case, and the carousel configuration handoff.

mod common;

use askama::Template;

use vetrina::application::showcase::build_showcase_view;
use vetrina::domain::entities::ShowcaseSettingsRecord;
use vetrina::domain::types::ClickBehavior;
use vetrina::presentation::views::ShowcaseFragmentTemplate;

use common::{build_app, sample_post};

fn settings_with(behavior: ClickBehavior) -> ShowcaseSettingsRecord {
    ShowcaseSettingsRecord {
        click_behavior: behavior,
        ..ShowcaseSettingsRecord::default()
    }
}

fn render(settings: &ShowcaseSettingsRecord, posts: &[vetrina::domain::entities::PostRecord]) -> String {
    let view = build_showcase_view(settings, posts);
    ShowcaseFragmentTemplate { view }
        .render()
        .expect("fragment renders")
}

#[tokio::test]
async fn zero_flagged_posts_emit_no_container_markup() {
    let app = build_app();
    app.store
        .insert_post(sample_post("quiet-post", "Quiet Post", 10))
        .await;
    // Post exists but carries no flag.

    let showcase = app
        .http_state
        .showcase
        .front_page()
        .await
        .expect("front page context");
    assert!(showcase.view.is_none());
    assert!(!showcase.mounted_after_header());
}

#[tokio::test]
async fn flagged_posts_appear_most_recent_first_up_to_the_limit() {
    let app = build_app();
    let older = sample_post("older", "Older", 120);
    let newer = sample_post("newer", "Newer", 5);
    app.store.insert_post(older.clone()).await;
    app.store.insert_post(newer.clone()).await;
    app.store.flag(older.id).await;
    app.store.flag(newer.id).await;

    let showcase = app
        .http_state
        .showcase
        .front_page()
        .await
        .expect("front page context");
    let view = showcase.view.expect("showcase view");
    let titles: Vec<&str> = view.slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn unrecognized_mount_hook_leaves_the_showcase_unmounted() {
    let app = build_app();
    let post = sample_post("featured", "Featured", 5);
    app.store.insert_post(post.clone()).await;
    app.store.flag(post.id).await;
    app.settings_repo
        .seed(ShowcaseSettingsRecord {
            mount_hook: "generate_sidebar".to_string(),
            ..ShowcaseSettingsRecord::default()
        })
        .await;

    let showcase = app
        .http_state
        .showcase
        .front_page()
        .await
        .expect("front page context");
    assert!(showcase.mount.is_none());
    assert!(showcase.view.is_none());
}

#[test]
fn entire_slide_wraps_each_slide_in_exactly_one_link() {
    let posts = vec![
        sample_post("first", "First", 5),
        sample_post("second", "Second", 10),
    ];
    let html = render(&settings_with(ClickBehavior::EntireSlide), &posts);

    assert_eq!(html.matches("showcase-slide-link").count(), 2);
    assert!(html.contains(r#"<a href="/posts/first" class="showcase-slide-link">"#));
    assert!(!html.contains("showcase-read-more"));
    // The title itself must not be a link in this layout.
    assert!(!html.contains(r#"<a href="/posts/first">First</a>"#));
}

#[test]
fn title_only_links_the_title_and_nothing_else() {
    let posts = vec![sample_post("first", "First", 5)];
    let html = render(&settings_with(ClickBehavior::TitleOnly), &posts);

    assert!(html.contains(r#"<a href="/posts/first">First</a>"#));
    assert!(!html.contains("showcase-slide-link"));
    assert!(!html.contains("showcase-read-more"));
}

#[test]
fn read_more_adds_a_trailing_action_link_only() {
    let posts = vec![sample_post("first", "First", 5)];
    let html = render(&settings_with(ClickBehavior::ReadMore), &posts);

    assert!(html.contains(r#"<a href="/posts/first" class="showcase-read-more">Read More</a>"#));
    assert!(!html.contains("showcase-slide-link"));
    assert!(!html.contains(r#"<a href="/posts/first">First</a>"#));
}

#[test]
fn container_carries_the_configured_margins() {
    let posts = vec![sample_post("first", "First", 5)];
    let settings = ShowcaseSettingsRecord {
        margin_top: 48,
        margin_bottom: 12,
        ..ShowcaseSettingsRecord::default()
    };
    let html = render(&settings, &posts);

    assert!(html.contains(r#"style="margin-top: 48px; margin-bottom: 12px;""#));
    assert!(html.contains("swiper-wrapper"));
    assert!(html.contains("swiper-pagination"));
    assert!(html.contains("swiper-button-prev"));
    assert!(html.contains("swiper-button-next"));
}

#[test]
fn thumbnails_render_only_when_present() {
    let mut with_thumb = sample_post("with-thumb", "With Thumb", 5);
    with_thumb.thumbnail_url = Some("/uploads/hero.jpg".to_string());
    let without_thumb = sample_post("bare", "Bare", 10);

    let html = render(
        &settings_with(ClickBehavior::EntireSlide),
        &[with_thumb, without_thumb],
    );
    assert_eq!(html.matches("showcase-slide-image").count(), 1);
    assert!(html.contains(r#"<img src="/uploads/hero.jpg" alt="With Thumb">"#));
}

#[tokio::test]
async fn carousel_config_reflects_the_autoplay_settings() {
    let app = build_app();
    app.settings_repo
        .seed(ShowcaseSettingsRecord::default())
        .await;

    let showcase = app
        .http_state
        .showcase
        .front_page()
        .await
        .expect("front page context");
    let config: serde_json::Value =
        serde_json::from_str(&showcase.carousel_config).expect("valid config json");
    assert_eq!(config["autoplay"]["delay"], 5000);

    app.settings_repo
        .seed(ShowcaseSettingsRecord {
            autoplay_enabled: false,
            ..ShowcaseSettingsRecord::default()
        })
        .await;
    let showcase = app
        .http_state
        .showcase
        .front_page()
        .await
        .expect("front page context");
    let config: serde_json::Value =
        serde_json::from_str(&showcase.carousel_config).expect("valid config json");
    assert!(config.get("autoplay").is_none());
}
