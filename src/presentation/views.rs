use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::{ErrorReport, HttpError};

/// Fixed versioned URLs for the bundled carousel widget.
pub const SWIPER_CSS_URL: &str = "https://unpkg.com/swiper@8.0.0/swiper-bundle.min.css";
pub const SWIPER_JS_URL: &str = "https://unpkg.com/swiper@8.0.0/swiper-bundle.min.js";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let mut response = (StatusCode::NOT_FOUND, "Page not found").into_response();
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "no route matched",
    )
    .attach(&mut response);
    response
}

/// One slide of the showcase fragment.
#[derive(Debug, Clone)]
pub struct SlideView {
    pub permalink: String,
    pub title: String,
    pub excerpt: String,
    pub thumbnail_url: Option<String>,
}

/// The showcase fragment: container, wrapper, slides. Exactly one of the
/// three link layouts is active per render.
#[derive(Debug, Clone)]
pub struct ShowcaseView {
    pub margin_top: i32,
    pub margin_bottom: i32,
    pub wrap_slide_in_link: bool,
    pub link_title: bool,
    pub show_read_more: bool,
    pub slides: Vec<SlideView>,
}

impl ShowcaseView {
    pub fn inline_style(&self) -> String {
        format!(
            "margin-top: {}px; margin-bottom: {}px;",
            self.margin_top, self.margin_bottom
        )
    }
}

#[derive(Template)]
#[template(path = "showcase.html")]
pub struct ShowcaseFragmentTemplate {
    pub view: ShowcaseView,
}

/// Front page context. The fragment is pre-rendered HTML so the layout only
/// decides which slot carries it.
pub struct FrontPageView {
    pub showcase_after_header: Option<String>,
    pub showcase_before_footer: Option<String>,
    pub carousel_config: String,
    pub swiper_css_url: &'static str,
    pub swiper_js_url: &'static str,
}

impl FrontPageView {
    pub fn new(
        showcase_after_header: Option<String>,
        showcase_before_footer: Option<String>,
        carousel_config: String,
    ) -> Self {
        Self {
            showcase_after_header,
            showcase_before_footer,
            carousel_config,
            swiper_css_url: SWIPER_CSS_URL,
            swiper_js_url: SWIPER_JS_URL,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: FrontPageView,
}
