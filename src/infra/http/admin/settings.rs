//! Settings screen handlers.

use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::access::EditorScope;
use crate::application::admin::settings::{AdminSettingsError, UpdateShowcaseSettingsCommand};
use crate::application::nonce::NonceSurface;
use crate::domain::entities::ShowcaseSettingsRecord;
use crate::presentation::admin::views::{AdminNotice, AdminSettingsTemplate, AdminSettingsView};
use crate::presentation::views::render_template_response;

use super::super::repo_error_to_http;
use super::{
    AdminState,
    shared::{forbidden, resolve_principal},
};

const SOURCE: &str = "infra::http::admin_settings";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SettingsForm {
    post_count: String,
    mount_hook: String,
    margin_top: String,
    margin_bottom: String,
    click_behavior: String,
    autoplay_enabled: Option<String>,
    autoplay_delay_ms: String,
    token: Option<String>,
}

impl SettingsForm {
    fn into_command(self) -> UpdateShowcaseSettingsCommand {
        UpdateShowcaseSettingsCommand {
            post_count: self.post_count,
            mount_hook: self.mount_hook,
            margin_top: self.margin_top,
            margin_bottom: self.margin_bottom,
            click_behavior: self.click_behavior,
            autoplay_enabled: self.autoplay_enabled.is_some(),
            autoplay_delay_ms: self.autoplay_delay_ms,
        }
    }
}

pub(crate) async fn admin_settings(State(state): State<AdminState>, headers: HeaderMap) -> Response {
    let permitted = resolve_principal(&state.access, &headers)
        .map(|p| p.can(EditorScope::ManageSettings))
        .unwrap_or(false);
    if !permitted {
        return forbidden(SOURCE).into_response();
    }

    let record = match state.settings.load().await {
        Ok(record) => record,
        Err(err) => return settings_error_to_response(err),
    };

    let view = view_from_record(&record, state.nonce.issue(NonceSurface::Settings, None), None);
    render_template_response(AdminSettingsTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_settings_update(
    State(state): State<AdminState>,
    headers: HeaderMap,
    Form(form): Form<SettingsForm>,
) -> Response {
    let permitted = resolve_principal(&state.access, &headers)
        .map(|p| p.can(EditorScope::ManageSettings))
        .unwrap_or(false);
    if !permitted {
        return forbidden(SOURCE).into_response();
    }

    let token_valid = form
        .token
        .as_deref()
        .map(|token| state.nonce.verify(NonceSurface::Settings, None, token))
        .unwrap_or(false);
    if !token_valid {
        let view = view_from_form(
            &form,
            state.nonce.issue(NonceSurface::Settings, None),
            Some(AdminNotice::error(
                "The form expired; settings were not saved.",
            )),
        );
        return render_template_response(AdminSettingsTemplate { view }, StatusCode::OK);
    }

    match state.settings.update(form.into_command()).await {
        Ok(updated) => {
            let view = view_from_record(
                &updated,
                state.nonce.issue(NonceSurface::Settings, None),
                Some(AdminNotice::success("Settings saved.")),
            );
            render_template_response(AdminSettingsTemplate { view }, StatusCode::OK)
        }
        Err(err) => settings_error_to_response(err),
    }
}

fn view_from_record(
    record: &ShowcaseSettingsRecord,
    form_token: String,
    notice: Option<AdminNotice>,
) -> AdminSettingsView {
    AdminSettingsView {
        post_count: record.post_count.to_string(),
        mount_hook: record.mount_hook.clone(),
        margin_top: record.margin_top.to_string(),
        margin_bottom: record.margin_bottom.to_string(),
        click_behavior: record.click_behavior.as_str(),
        autoplay_enabled: record.autoplay_enabled,
        autoplay_delay_ms: record.autoplay_delay_ms.to_string(),
        form_token,
        notice,
    }
}

/// Echo the submitted values back when the form could not be accepted.
fn view_from_form(
    form: &SettingsForm,
    form_token: String,
    notice: Option<AdminNotice>,
) -> AdminSettingsView {
    AdminSettingsView {
        post_count: form.post_count.clone(),
        mount_hook: form.mount_hook.clone(),
        margin_top: form.margin_top.clone(),
        margin_bottom: form.margin_bottom.clone(),
        click_behavior: crate::domain::types::ClickBehavior::parse_or_default(
            form.click_behavior.trim(),
        )
        .as_str(),
        autoplay_enabled: form.autoplay_enabled.is_some(),
        autoplay_delay_ms: form.autoplay_delay_ms.clone(),
        form_token,
        notice,
    }
}

fn settings_error_to_response(err: AdminSettingsError) -> Response {
    match err {
        AdminSettingsError::Repo(repo) => repo_error_to_http(SOURCE, repo).into_response(),
    }
}
