use std::{process, sync::Arc};

use tokio::try_join;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;
use uuid::Uuid;
use vetrina::{
    application::{
        access::AccessService,
        admin::{flags::AdminFlagService, settings::AdminShowcaseSettingsService},
        error::AppError,
        nonce::NonceService,
        repos::{FlagsRepo, PostsRepo, SettingsRepo},
        showcase::ShowcaseService,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, HttpState},
        telemetry,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let (http_state, admin_state) = build_application_context(repositories, &settings);
    serve_http(&settings, http_state, admin_state).await
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_application_context(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> (HttpState, AdminState) {
    let posts_repo: Arc<dyn PostsRepo> = repositories.clone();
    let flags_repo: Arc<dyn FlagsRepo> = repositories.clone();
    let settings_repo: Arc<dyn SettingsRepo> = repositories;

    let nonce_secret = settings.admin.nonce_secret.clone().unwrap_or_else(|| {
        warn!(
            target = "vetrina::startup",
            "no admin.nonce_secret configured; using an ephemeral secret, open forms will not survive restarts"
        );
        Uuid::new_v4().to_string()
    });

    let nonce = Arc::new(NonceService::new(nonce_secret));
    let access = Arc::new(AccessService::new(settings.admin.editor_tokens.clone()));

    let showcase = Arc::new(ShowcaseService::new(
        posts_repo.clone(),
        settings_repo.clone(),
    ));
    let flag_service = Arc::new(AdminFlagService::new(
        posts_repo.clone(),
        flags_repo,
        nonce.clone(),
    ));
    let settings_service = Arc::new(AdminShowcaseSettingsService::new(settings_repo));

    let http_state = HttpState { showcase };
    let admin_state = AdminState {
        posts: posts_repo,
        flags: flag_service,
        settings: settings_service,
        access,
        nonce,
        post_list_limit: settings.admin.post_list_limit.get(),
    };

    (http_state, admin_state)
}

async fn serve_http(
    settings: &config::Settings,
    http_state: HttpState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let public_router = http::build_router(http_state);
    let admin_router = http::build_admin_router(admin_state);

    let public_listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let admin_listener = tokio::net::TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "vetrina::startup",
        public = %settings.server.public_addr,
        admin = %settings.server.admin_addr,
        "listening"
    );

    let public_server = axum::serve(public_listener, public_router.into_make_service());
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service());

    try_join!(public_server, admin_server)
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
