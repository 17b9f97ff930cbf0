use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    application::error::HttpError,
    application::showcase::{FrontPageShowcase, ShowcaseError, ShowcaseService},
    presentation::views::{
        FrontPageView, IndexTemplate, ShowcaseFragmentTemplate, TemplateRenderError,
        render_not_found_response, render_template_response,
    },
};

use super::{
    middleware::{log_responses, set_request_context},
    repo_error_to_http,
};

const SOURCE: &str = "infra::http::public";

#[derive(Clone)]
pub struct HttpState {
    pub showcase: Arc<ShowcaseService>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/static/public/{*path}",
            get(crate::infra::assets::serve_public),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

/// The front page is the only place the showcase renders.
async fn index(State(state): State<HttpState>) -> Response {
    let showcase = match state.showcase.front_page().await {
        Ok(showcase) => showcase,
        Err(err) => return showcase_error_to_http(err).into_response(),
    };

    let fragment = match render_fragment(&showcase) {
        Ok(fragment) => fragment,
        Err(err) => return err.into_response(),
    };

    let (after_header, before_footer) = if showcase.mounted_after_header() {
        (fragment, None)
    } else if showcase.mounted_before_footer() {
        (None, fragment)
    } else {
        (None, None)
    };

    let view = FrontPageView::new(after_header, before_footer, showcase.carousel_config);
    render_template_response(IndexTemplate { view }, StatusCode::OK)
}

fn render_fragment(showcase: &FrontPageShowcase) -> Result<Option<String>, HttpError> {
    let Some(view) = showcase.view.clone() else {
        return Ok(None);
    };

    let template = ShowcaseFragmentTemplate { view };
    template.render().map(Some).map_err(|err| {
        TemplateRenderError::new(SOURCE, "Template rendering failed", err).into()
    })
}

fn showcase_error_to_http(err: ShowcaseError) -> HttpError {
    match err {
        ShowcaseError::Repo(repo) => repo_error_to_http(SOURCE, repo),
    }
}

async fn fallback() -> Response {
    render_not_found_response()
}
