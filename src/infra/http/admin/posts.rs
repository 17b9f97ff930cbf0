//! Post list, editor panel, and flag save handlers.

use axum::{
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::access::EditorPrincipal;
use crate::application::admin::flags::{
    AdminFlagError, SaveFlagCommand, SaveFlagOutcome, hydration_json,
};
use crate::application::nonce::NonceSurface;
use crate::application::repos::RepoError;
use crate::domain::entities::PostRecord;
use crate::domain::types::PostStatus;
use crate::presentation::admin::views::{
    AdminNotice, AdminPostEditTemplate, AdminPostEditView, AdminPostListView, AdminPostRowView,
    AdminPostsTemplate,
};
use crate::presentation::views::{render_not_found_response, render_template_response};

use super::super::repo_error_to_http;
use super::{
    AdminState,
    shared::{forbidden, resolve_principal},
};

const SOURCE: &str = "infra::http::admin_posts";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NoticeQuery {
    saved: Option<u8>,
}

/// A flag submission from either editing surface. Only the literal `"yes"`
/// sets the flag; a missing field clears it like any other value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FlagForm {
    sticky: Option<String>,
    token: Option<String>,
    origin: Option<String>,
}

impl FlagForm {
    fn into_command(self, post_id: Uuid, surface: NonceSurface) -> SaveFlagCommand {
        SaveFlagCommand {
            post_id,
            submitted: self.sticky.unwrap_or_default(),
            token: self.token,
            surface,
            autosave: self.origin.as_deref() == Some("autosave"),
        }
    }
}

pub(crate) async fn admin_posts(
    State(state): State<AdminState>,
    Query(query): Query<NoticeQuery>,
    headers: HeaderMap,
) -> Response {
    let Some(_principal) = resolve_principal(&state.access, &headers) else {
        return forbidden(SOURCE).into_response();
    };

    let notice = query
        .saved
        .map(|_| AdminNotice::success("Slider option updated."));
    render_posts_page(&state, notice).await
}

async fn render_posts_page(state: &AdminState, notice: Option<AdminNotice>) -> Response {
    let posts = match state.posts.list_recent_posts(state.post_list_limit).await {
        Ok(posts) => posts,
        Err(err) => return repo_error_to_http(SOURCE, err).into_response(),
    };

    let ids: Vec<Uuid> = posts.iter().map(|post| post.id).collect();
    let flag_map = match state.flags.flag_map(&ids).await {
        Ok(map) => map,
        Err(err) => return flag_error_to_response(err),
    };

    let rows = posts
        .iter()
        .map(|post| {
            let flag = flag_map
                .get(&post.id)
                .copied()
                .unwrap_or(crate::domain::flags::StickyFlag::No);
            AdminPostRowView {
                id: post.id.to_string(),
                title: post.title.clone(),
                slug: post.slug.clone(),
                status_label: status_label(post),
                flag_label: if flag.is_set() {
                    "Yes".to_string()
                } else {
                    "\u{2014}".to_string()
                },
                edit_href: format!("/posts/{}/edit", post.id),
                quick_edit_token: state.nonce.issue(NonceSurface::QuickEdit, Some(post.id)),
            }
        })
        .collect();

    let view = AdminPostListView {
        rows,
        hydration_json: hydration_json(&ids, &flag_map),
        notice,
    };
    render_template_response(AdminPostsTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_post_edit(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    Query(query): Query<NoticeQuery>,
    headers: HeaderMap,
) -> Response {
    let Some(_principal) = resolve_principal(&state.access, &headers) else {
        return forbidden(SOURCE).into_response();
    };

    let post = match state.posts.find_by_id(id).await {
        Ok(Some(post)) => post,
        Ok(None) => return render_not_found_response(),
        Err(err) => return repo_error_to_http(SOURCE, err).into_response(),
    };

    let flag = match state.flags.flag_for(id).await {
        Ok(flag) => flag,
        Err(err) => return flag_error_to_response(err),
    };

    let notice = query
        .saved
        .map(|_| AdminNotice::success("Slider option saved."));

    let view = AdminPostEditView {
        id: post.id.to_string(),
        title: post.title.clone(),
        flag_is_yes: flag.is_set(),
        panel_token: state.nonce.issue(NonceSurface::EditorPanel, Some(id)),
        notice,
    };
    render_template_response(AdminPostEditTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_post_flag(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Form(form): Form<FlagForm>,
) -> Response {
    let principal = resolve_principal(&state.access, &headers);
    let command = form.into_command(id, NonceSurface::EditorPanel);
    let destination = format!("/posts/{id}/edit");
    save_and_redirect(&state, principal, command, &destination).await
}

pub(crate) async fn admin_post_flag_quick(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Form(form): Form<FlagForm>,
) -> Response {
    let principal = resolve_principal(&state.access, &headers);
    let command = form.into_command(id, NonceSurface::QuickEdit);
    save_and_redirect(&state, principal, command, "/posts").await
}

/// Persist the submission and bounce back to the originating screen. Guard
/// failures redirect without a notice: the save silently did not happen.
async fn save_and_redirect(
    state: &AdminState,
    principal: Option<EditorPrincipal>,
    command: SaveFlagCommand,
    destination: &str,
) -> Response {
    match state.flags.save(principal.as_ref(), command).await {
        Ok(SaveFlagOutcome::Saved(_)) => {
            Redirect::to(&format!("{destination}?saved=1")).into_response()
        }
        Ok(SaveFlagOutcome::Skipped(_)) => Redirect::to(destination).into_response(),
        Err(err) => flag_error_to_response(err),
    }
}

fn flag_error_to_response(err: AdminFlagError) -> Response {
    match err {
        AdminFlagError::UnknownPost => repo_error_to_http(SOURCE, RepoError::NotFound).into_response(),
        AdminFlagError::Repo(repo) => repo_error_to_http(SOURCE, repo).into_response(),
    }
}

fn status_label(post: &PostRecord) -> &'static str {
    match post.status {
        PostStatus::Draft => "Draft",
        PostStatus::Published => "Published",
        PostStatus::Archived => "Archived",
    }
}
