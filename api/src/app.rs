//! Application factory
//!
//! Builds the Actix-web application with all routes, middleware and state.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;
use fs_shared::config::ServerConfig;

use crate::middleware::{create_cors, JwtAuth};
use crate::routes::auth::{
    confirm_email::confirm_email, forgot_password::forgot_password, login::login, logout::logout,
    refresh::refresh, register::register, reset_password::reset_password, AppState,
};
use crate::routes::users::profile::{change_password, delete_me, get_me, update_me};

/// Create and configure the application with all dependencies
pub fn create_app<U, P, E>(
    app_state: web::Data<AppState<U, P, E>>,
    server_config: &ServerConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    E: EmailSender + 'static,
{
    let cors = create_cors(server_config);
    let token_service = app_state.token_service.clone();

    App::new()
        // Add application state
        .app_data(app_state)
        // Middleware (order matters: CORS outermost, then request tracing)
        .wrap(cors)
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, P, E>))
                        .route("/login", web::post().to(login::<U, P, E>))
                        .route("/refresh", web::post().to(refresh::<U, P, E>))
                        .route("/confirm-email", web::post().to(confirm_email::<U, P, E>))
                        .route(
                            "/forgot-password",
                            web::post().to(forgot_password::<U, P, E>),
                        )
                        .route(
                            "/reset-password",
                            web::post().to(reset_password::<U, P, E>),
                        )
                        .route(
                            "/logout",
                            web::post()
                                .to(logout::<U, P, E>)
                                .wrap(JwtAuth::new(token_service.clone())),
                        ),
                )
                .service(
                    web::scope("/users")
                        .wrap(JwtAuth::new(token_service))
                        .route("/me", web::get().to(get_me::<U, P, E>))
                        .route("/me", web::put().to(update_me::<U, P, E>))
                        .route("/me", web::delete().to(delete_me::<U, P, E>))
                        .route("/me/password", web::post().to(change_password::<U, P, E>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "friendshare-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
