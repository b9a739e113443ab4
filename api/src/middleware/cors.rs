//! CORS middleware configuration

use actix_cors::Cors;
use actix_web::http::header;

use fs_shared::config::ServerConfig;

/// Build the CORS layer from server configuration.
///
/// An empty origin list allows any origin, which is acceptable only for
/// local development.
pub fn create_cors(config: &ServerConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600);

    if config.allowed_origins.is_empty() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
