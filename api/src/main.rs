use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use libris_api::{app, middleware, AppState};
use libris_core::services::{
    AuditService, AuthConfig, AuthService, LibraryService, TokenCleanupConfig,
    TokenCleanupService, TokenService, TokenServiceConfig,
};
use libris_infra::{
    BcryptPasswordHasher, DatabasePool, LoggingEmailService, MySqlAuditLogRepository,
    MySqlBookRepository, MySqlTokenRepository, MySqlUserRepository, RedisTokenCache,
};
use libris_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!(environment = ?config.environment, "starting libris-api");

    if config.environment.is_production() && config.secrets.is_using_default_secret() {
        tracing::warn!("default token secrets are in use; set the *_TOKEN_SECRET variables");
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let cache = RedisTokenCache::new(config.cache.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let token_repo = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
    let user_repo = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let book_repo = Arc::new(MySqlBookRepository::new(pool.get_pool().clone()));
    let audit_repo = Arc::new(MySqlAuditLogRepository::new(pool.get_pool().clone()));
    let audit = Arc::new(AuditService::new(audit_repo));

    let tokens = Arc::new(TokenService::new(
        Arc::clone(&token_repo),
        Arc::clone(&user_repo),
        Arc::new(cache),
        Arc::clone(&audit),
        TokenServiceConfig::with_secrets(config.secrets.clone()),
    ));

    let auth = Arc::new(AuthService::new(
        Arc::clone(&tokens),
        Arc::clone(&user_repo),
        Arc::new(LoggingEmailService::new()),
        Arc::new(BcryptPasswordHasher::new()),
        AuthConfig::from_env(),
    ));

    let library = Arc::new(LibraryService::new(book_repo));

    let cleanup = Arc::new(TokenCleanupService::new(
        token_repo,
        audit,
        TokenCleanupConfig::default(),
    ));
    cleanup.start_background_tasks();

    let state = web::Data::new(AppState {
        auth,
        tokens,
        library,
    });

    let bind_address = config.server.bind_address();
    info!(%bind_address, "binding HTTP server");

    let cors_config = config.cors.clone();
    let workers = config.server.workers;

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(middleware::cors::build_cors(&cors_config))
            .configure(app::configure)
            .default_service(web::route().to(app::not_found))
    });

    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}
