//! Route table and default handlers.

use actix_web::{web, HttpResponse};

use crate::dto::ErrorResponse;
use crate::middleware::JwtAuth;
use crate::routes;

/// Register every route on the app
///
/// The catalog and the per-user checkout/waitlist scopes sit behind the
/// JWT middleware; the auth flows and the health endpoint are open.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(routes::health::health))
        .route("/register", web::post().to(routes::auth::register))
        .route("/auth", web::post().to(routes::auth::login))
        .route("/refresh", web::post().to(routes::auth::refresh))
        .route("/logout", web::post().to(routes::auth::logout))
        .route("/forgot", web::post().to(routes::auth::forgot_password))
        .route(
            "/reset-password",
            web::post().to(routes::auth::reset_password),
        )
        .service(
            web::scope("/books")
                .wrap(JwtAuth)
                .route("", web::get().to(routes::books::search))
                .route("/{isbn}", web::get().to(routes::books::get)),
        )
        .service(
            web::scope("/users")
                .wrap(JwtAuth)
                .route("/checkouts", web::put().to(routes::account::checkout))
                .route("/checkouts", web::delete().to(routes::account::check_in))
                .route("/waitlist", web::put().to(routes::account::join_waitlist))
                .route(
                    "/waitlist",
                    web::delete().to(routes::account::leave_waitlist),
                ),
        );
}

/// JSON body for anything outside the route table
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
