mod posts;
mod settings;
mod shared;
mod state;

pub use state::AdminState;

use axum::{
    Router,
    middleware,
    routing::{get, post},
};

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(posts::admin_posts))
        .route("/posts", get(posts::admin_posts))
        .route("/posts/{id}/edit", get(posts::admin_post_edit))
        .route("/posts/{id}/flag", post(posts::admin_post_flag))
        .route("/posts/{id}/flag/quick", post(posts::admin_post_flag_quick))
        .route(
            "/settings",
            get(settings::admin_settings).post(settings::admin_settings_update),
        )
        .route(
            "/static/admin/{*path}",
            get(crate::infra::assets::serve_admin),
        )
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
