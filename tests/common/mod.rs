//! In-memory repository fakes shared by the integration suites.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use uuid::Uuid;

use vetrina::application::access::AccessService;
use vetrina::application::admin::flags::AdminFlagService;
use vetrina::application::admin::settings::AdminShowcaseSettingsService;
use vetrina::application::nonce::NonceService;
use vetrina::application::repos::{FlagsRepo, PostsRepo, RepoError, SettingsRepo};
use vetrina::application::showcase::ShowcaseService;
use vetrina::domain::entities::{PostRecord, ShowcaseSettingsRecord};
use vetrina::domain::flags::STICKY_FLAG_YES;
use vetrina::domain::types::PostStatus;
use vetrina::infra::http::{AdminState, HttpState};

/// Posts plus their flag rows, playing the host platform's content store.
#[derive(Default)]
pub struct FakeContentStore {
    pub posts: Mutex<Vec<PostRecord>>,
    pub flags: Mutex<HashMap<Uuid, String>>,
}

impl FakeContentStore {
    pub async fn insert_post(&self, post: PostRecord) {
        self.posts.lock().await.push(post);
    }

    pub async fn flag(&self, post_id: Uuid) {
        self.flags
            .lock()
            .await
            .insert(post_id, STICKY_FLAG_YES.to_string());
    }

    pub async fn stored_flag(&self, post_id: Uuid) -> Option<String> {
        self.flags.lock().await.get(&post_id).cloned()
    }
}

#[async_trait]
impl PostsRepo for FakeContentStore {
    async fn list_flagged_posts(&self, limit: u32) -> Result<Vec<PostRecord>, RepoError> {
        let flags = self.flags.lock().await;
        let mut matching: Vec<PostRecord> = self
            .posts
            .lock()
            .await
            .iter()
            .filter(|post| {
                post.status == PostStatus::Published
                    && post.published_at.is_some()
                    && flags.get(&post.id).map(String::as_str) == Some(STICKY_FLAG_YES)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|post| std::cmp::Reverse(post.published_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn list_recent_posts(&self, limit: u32) -> Result<Vec<PostRecord>, RepoError> {
        let mut posts = self.posts.lock().await.clone();
        posts.sort_by_key(|post| std::cmp::Reverse(post.updated_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }
}

#[async_trait]
impl FlagsRepo for FakeContentStore {
    async fn load_flag(&self, post_id: Uuid) -> Result<Option<String>, RepoError> {
        Ok(self.flags.lock().await.get(&post_id).cloned())
    }

    async fn load_flags(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, String>, RepoError> {
        let flags = self.flags.lock().await;
        Ok(post_ids
            .iter()
            .filter_map(|id| flags.get(id).map(|value| (*id, value.clone())))
            .collect())
    }

    async fn set_flag(&self, post_id: Uuid, value: &str) -> Result<(), RepoError> {
        self.flags.lock().await.insert(post_id, value.to_string());
        Ok(())
    }

    async fn clear_flag(&self, post_id: Uuid) -> Result<(), RepoError> {
        self.flags.lock().await.remove(&post_id);
        Ok(())
    }
}

/// Settings row storage; `None` means the row was never written.
#[derive(Default)]
pub struct FakeSettingsRepo {
    record: Mutex<Option<ShowcaseSettingsRecord>>,
}

impl FakeSettingsRepo {
    pub async fn seed(&self, record: ShowcaseSettingsRecord) {
        *self.record.lock().await = Some(record);
    }
}

#[async_trait]
impl SettingsRepo for FakeSettingsRepo {
    async fn load_showcase_settings(&self) -> Result<ShowcaseSettingsRecord, RepoError> {
        Ok(self.record.lock().await.clone().unwrap_or_default())
    }

    async fn upsert_showcase_settings(
        &self,
        settings: ShowcaseSettingsRecord,
    ) -> Result<(), RepoError> {
        *self.record.lock().await = Some(settings);
        Ok(())
    }
}

pub fn sample_post(slug: &str, title: &str, published_minutes_ago: i64) -> PostRecord {
    let now = OffsetDateTime::now_utc();
    let published = now - Duration::minutes(published_minutes_ago);
    PostRecord {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: title.to_string(),
        excerpt: format!("Excerpt for {title}."),
        thumbnail_url: None,
        status: PostStatus::Published,
        published_at: Some(published),
        created_at: published,
        updated_at: published,
    }
}

pub struct TestApp {
    pub store: Arc<FakeContentStore>,
    pub settings_repo: Arc<FakeSettingsRepo>,
    pub nonce: Arc<NonceService>,
    pub http_state: HttpState,
    pub admin_state: AdminState,
}

pub fn build_app() -> TestApp {
    let store = Arc::new(FakeContentStore::default());
    let settings_repo = Arc::new(FakeSettingsRepo::default());
    let nonce = Arc::new(NonceService::new("integration-secret"));
    let access = Arc::new(AccessService::new(Vec::new()));

    let posts_repo: Arc<dyn PostsRepo> = store.clone();
    let flags_repo: Arc<dyn FlagsRepo> = store.clone();
    let settings_dyn: Arc<dyn SettingsRepo> = settings_repo.clone();

    let showcase = Arc::new(ShowcaseService::new(posts_repo.clone(), settings_dyn.clone()));
    let flags = Arc::new(AdminFlagService::new(
        posts_repo.clone(),
        flags_repo,
        nonce.clone(),
    ));
    let settings_service = Arc::new(AdminShowcaseSettingsService::new(settings_dyn));

    let http_state = HttpState { showcase };
    let admin_state = AdminState {
        posts: posts_repo,
        flags,
        settings: settings_service,
        access,
        nonce: nonce.clone(),
        post_list_limit: 50,
    };

    TestApp {
        store,
        settings_repo,
        nonce,
        http_state,
        admin_state,
    }
}
