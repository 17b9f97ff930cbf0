use axum::http::{HeaderMap, StatusCode};

use crate::application::access::{AccessService, EditorPrincipal};
use crate::application::error::HttpError;

/// Header carrying an editor token when tokens are configured.
pub(crate) const EDITOR_TOKEN_HEADER: &str = "x-vetrina-editor-token";

/// Resolve the request's editor principal, if any.
pub(crate) fn resolve_principal(
    access: &AccessService,
    headers: &HeaderMap,
) -> Option<EditorPrincipal> {
    let presented = headers
        .get(EDITOR_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    access.authenticate(presented)
}

pub(crate) fn forbidden(source: &'static str) -> HttpError {
    HttpError::new(
        source,
        StatusCode::FORBIDDEN,
        "You are not allowed to do that",
        "request lacked a principal with the required scope",
    )
}
