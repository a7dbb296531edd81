//! CORS policy built from configuration.

use actix_cors::Cors;
use actix_web::http::header;

use libris_shared::config::CorsConfig;

/// Build the CORS middleware from the configured allow-list
pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(config.allowed_methods.iter().map(String::as_str))
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(3600);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
