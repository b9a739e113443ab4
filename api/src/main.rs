use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use fs_api::app::create_app;
use fs_api::routes::AppState;
use fs_core::services::auth::{AuthService, AuthServiceConfig};
use fs_core::services::email::EmailSender;
use fs_core::services::token::{TokenConfig, TokenService};
use fs_core::services::user::UserService;
use fs_infra::database::create_pool;
use fs_infra::{BcryptPasswordHasher, LogOnlyEmailSender, MySqlUserRepository, SmtpEmailSender};
use fs_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting FriendShare API server");

    // A weak signing secret is a deployment mistake; refuse to start.
    let token_service = Arc::new(
        TokenService::new(TokenConfig::from(&config.auth.jwt))
            .context("invalid JWT configuration")?,
    );

    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool));
    let password_hasher = Arc::new(BcryptPasswordHasher::new());

    if config.email.smtp_username.is_empty() {
        tracing::warn!("SMTP is not configured; email content will be logged instead of sent");
        run_server(
            config,
            user_repository,
            password_hasher,
            Arc::new(LogOnlyEmailSender),
            token_service,
        )
        .await
    } else {
        let email_sender = Arc::new(
            SmtpEmailSender::new(&config.email).context("invalid SMTP configuration")?,
        );
        run_server(
            config,
            user_repository,
            password_hasher,
            email_sender,
            token_service,
        )
        .await
    }
}

async fn run_server<E>(
    config: AppConfig,
    user_repository: Arc<MySqlUserRepository>,
    password_hasher: Arc<BcryptPasswordHasher>,
    email_sender: Arc<E>,
    token_service: Arc<TokenService>,
) -> anyhow::Result<()>
where
    E: EmailSender + 'static,
{
    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        password_hasher.clone(),
        email_sender,
        token_service.clone(),
        AuthServiceConfig::from(&config.auth),
    ));
    let user_service = Arc::new(UserService::new(user_repository, password_hasher));

    let app_state = web::Data::new(AppState::new(auth_service, user_service, token_service));

    let bind_address = config.server.bind_address();
    let server_config = config.server.clone();
    tracing::info!(%bind_address, "server listening");

    let mut server =
        HttpServer::new(move || create_app(app_state.clone(), &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
