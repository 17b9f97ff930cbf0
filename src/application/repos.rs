//! Repository traits describing persistence adapters.
//!
//! The content store behind these traits plays the host platform's role:
//! posts are read-only from Vetrina's point of view, and the only writes
//! this crate performs are the sticky-flag metadata row and the showcase
//! settings row.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{PostRecord, ShowcaseSettingsRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Up to `limit` published posts carrying the sticky flag, most recent
    /// first (the store's default recency order; no further guarantee).
    async fn list_flagged_posts(&self, limit: u32) -> Result<Vec<PostRecord>, RepoError>;

    /// Posts for the admin list table, most recently updated first.
    async fn list_recent_posts(&self, limit: u32) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;
}

#[async_trait]
pub trait FlagsRepo: Send + Sync {
    /// Raw stored value for one post, `None` when the row is absent.
    async fn load_flag(&self, post_id: Uuid) -> Result<Option<String>, RepoError>;

    /// Stored values for a batch of posts; absent rows are simply missing
    /// from the map.
    async fn load_flags(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, String>, RepoError>;

    async fn set_flag(&self, post_id: Uuid, value: &str) -> Result<(), RepoError>;

    /// Remove the flag row entirely. Deleting an absent row is not an error.
    async fn clear_flag(&self, post_id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    /// Load the showcase settings row, falling back to the documented
    /// defaults when it was never written.
    async fn load_showcase_settings(&self) -> Result<ShowcaseSettingsRecord, RepoError>;

    async fn upsert_showcase_settings(
        &self,
        settings: ShowcaseSettingsRecord,
    ) -> Result<(), RepoError>;
}
