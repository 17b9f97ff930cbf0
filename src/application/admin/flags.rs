//! Saving and reading the sticky flag from the admin surfaces.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::application::access::{EditorPrincipal, EditorScope};
use crate::application::nonce::{NonceService, NonceSurface};
use crate::application::repos::{FlagsRepo, PostsRepo, RepoError};
use crate::domain::flags::{STICKY_FLAG_YES, StickyFlag};

#[derive(Debug, Error)]
pub enum AdminFlagError {
    #[error("post not found")]
    UnknownPost,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A flag submission from one of the two editing surfaces.
#[derive(Debug, Clone)]
pub struct SaveFlagCommand {
    pub post_id: Uuid,
    /// Raw submitted value; only the literal `"yes"` sets the flag.
    pub submitted: String,
    pub token: Option<String>,
    pub surface: NonceSurface,
    /// Automated background saves never persist the flag.
    pub autosave: bool,
}

/// Why a save request was dropped. All of these are silent: the caller
/// responds as if nothing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Autosave,
    MissingPermission,
    InvalidToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFlagOutcome {
    Saved(StickyFlag),
    Skipped(SkipReason),
}

#[derive(Clone)]
pub struct AdminFlagService {
    posts: Arc<dyn PostsRepo>,
    flags: Arc<dyn FlagsRepo>,
    nonce: Arc<NonceService>,
}

impl AdminFlagService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        flags: Arc<dyn FlagsRepo>,
        nonce: Arc<NonceService>,
    ) -> Self {
        Self {
            posts,
            flags,
            nonce,
        }
    }

    /// Persist a flag submission.
    ///
    /// The guard order matches the save conventions of the editing
    /// surfaces: autosave context, then permission, then the anti-forgery
    /// token. Every guard failure is a silent skip, not an error. A passing
    /// request sets the flag row for `"yes"` and deletes it for anything
    /// else; absence, not a stored "no", is the unset state.
    pub async fn save(
        &self,
        principal: Option<&EditorPrincipal>,
        command: SaveFlagCommand,
    ) -> Result<SaveFlagOutcome, AdminFlagError> {
        if command.autosave {
            debug!(post_id = %command.post_id, "flag save skipped: autosave context");
            return Ok(SaveFlagOutcome::Skipped(SkipReason::Autosave));
        }

        let permitted = principal
            .map(|p| p.can(EditorScope::EditPosts))
            .unwrap_or(false);
        if !permitted {
            debug!(post_id = %command.post_id, "flag save skipped: missing edit permission");
            return Ok(SaveFlagOutcome::Skipped(SkipReason::MissingPermission));
        }

        let token_valid = command
            .token
            .as_deref()
            .map(|token| {
                self.nonce
                    .verify(command.surface, Some(command.post_id), token)
            })
            .unwrap_or(false);
        if !token_valid {
            debug!(post_id = %command.post_id, "flag save skipped: invalid anti-forgery token");
            return Ok(SaveFlagOutcome::Skipped(SkipReason::InvalidToken));
        }

        if self.posts.find_by_id(command.post_id).await?.is_none() {
            return Err(AdminFlagError::UnknownPost);
        }

        if command.submitted == STICKY_FLAG_YES {
            self.flags
                .set_flag(command.post_id, STICKY_FLAG_YES)
                .await?;
            Ok(SaveFlagOutcome::Saved(StickyFlag::Yes))
        } else {
            self.flags.clear_flag(command.post_id).await?;
            Ok(SaveFlagOutcome::Saved(StickyFlag::No))
        }
    }

    pub async fn flag_for(&self, post_id: Uuid) -> Result<StickyFlag, AdminFlagError> {
        let stored = self.flags.load_flag(post_id).await?;
        Ok(StickyFlag::from_stored(stored.as_deref()))
    }

    /// Flags for a set of posts, as explicit yes/no.
    pub async fn flag_map(
        &self,
        post_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, StickyFlag>, AdminFlagError> {
        let stored = self.flags.load_flags(post_ids).await?;
        Ok(post_ids
            .iter()
            .map(|id| {
                (
                    *id,
                    StickyFlag::from_stored(stored.get(id).map(String::as_str)),
                )
            })
            .collect())
    }

}

/// The JSON mapping injected into the admin post list for quick-edit
/// hydration: `{ "<post-id>": "yes" | "no" }`.
pub fn hydration_json(post_ids: &[Uuid], flags: &HashMap<Uuid, StickyFlag>) -> String {
    let mut object = Map::new();
    for id in post_ids {
        let flag = flags.get(id).copied().unwrap_or(StickyFlag::No);
        object.insert(id.to_string(), Value::from(flag.as_str()));
    }
    Value::Object(object).to_string()
}
