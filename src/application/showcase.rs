//! Front-page showcase rendering.
//!
//! One query, one scoped result: the service loads the typed settings,
//! fetches the flagged posts, and hands back a view value whose lifetime is
//! local to the render call. Nothing here mutates stored state.

use std::sync::Arc;

use thiserror::Error;

use crate::application::carousel::{self, CarouselSettings};
use crate::application::repos::{PostsRepo, RepoError, SettingsRepo};
use crate::domain::entities::{PostRecord, ShowcaseSettingsRecord};
use crate::domain::types::{ClickBehavior, MountPoint};
use crate::presentation::views::{ShowcaseView, SlideView};

const MIN_POST_COUNT: i32 = 1;
const MAX_POST_COUNT: i32 = 20;

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Everything the front page needs from the showcase subsystem.
#[derive(Debug, Clone)]
pub struct FrontPageShowcase {
    /// Slot the fragment mounts into; `None` leaves the showcase unmounted.
    pub mount: Option<MountPoint>,
    /// The fragment view, absent when unmounted or when no posts carry the
    /// flag.
    pub view: Option<ShowcaseView>,
    /// Serialized widget configuration for the carousel JSON island.
    pub carousel_config: String,
}

impl FrontPageShowcase {
    pub fn mounted_after_header(&self) -> bool {
        self.view.is_some() && self.mount == Some(MountPoint::AfterHeader)
    }

    pub fn mounted_before_footer(&self) -> bool {
        self.view.is_some() && self.mount == Some(MountPoint::BeforeFooter)
    }
}

#[derive(Clone)]
pub struct ShowcaseService {
    posts: Arc<dyn PostsRepo>,
    settings: Arc<dyn SettingsRepo>,
}

impl ShowcaseService {
    pub fn new(posts: Arc<dyn PostsRepo>, settings: Arc<dyn SettingsRepo>) -> Self {
        Self { posts, settings }
    }

    pub async fn front_page(&self) -> Result<FrontPageShowcase, ShowcaseError> {
        let settings = self.settings.load_showcase_settings().await?;
        let carousel_config =
            carousel::widget_config(CarouselSettings::from(&settings)).to_string();

        let mount = MountPoint::resolve(&settings.mount_hook);
        let view = match mount {
            Some(_) => self.build_view(&settings).await?,
            None => None,
        };

        Ok(FrontPageShowcase {
            mount,
            view,
            carousel_config,
        })
    }

    async fn build_view(
        &self,
        settings: &ShowcaseSettingsRecord,
    ) -> Result<Option<ShowcaseView>, ShowcaseError> {
        let limit = settings.post_count.clamp(MIN_POST_COUNT, MAX_POST_COUNT) as u32;
        let posts = self.posts.list_flagged_posts(limit).await?;
        if posts.is_empty() {
            return Ok(None);
        }
        Ok(Some(build_showcase_view(settings, &posts)))
    }
}

/// Assemble the fragment view from stored settings and the flagged posts.
pub fn build_showcase_view(
    settings: &ShowcaseSettingsRecord,
    posts: &[PostRecord],
) -> ShowcaseView {
    let behavior = settings.click_behavior;
    let slides = posts
        .iter()
        .map(|post| SlideView {
            permalink: post.permalink(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            thumbnail_url: post.thumbnail_url.clone(),
        })
        .collect();

    ShowcaseView {
        margin_top: settings.margin_top.max(0),
        margin_bottom: settings.margin_bottom.max(0),
        wrap_slide_in_link: behavior == ClickBehavior::EntireSlide,
        link_title: behavior == ClickBehavior::TitleOnly,
        show_read_more: behavior == ClickBehavior::ReadMore,
        slides,
    }
}
