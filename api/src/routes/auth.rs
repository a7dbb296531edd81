//! Registration, login, token rotation and password-reset handlers.

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web, HttpRequest, HttpResponse,
};
use validator::Validate;

use libris_core::domain::entities::TokenPair;

use crate::dto::auth::{
    ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse, RefreshResponse,
    RegisterRequest, RegisterResponse, ResetPasswordQuery, ResetPasswordRequest,
};
use crate::dto::ErrorResponse;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Cookie carrying the refresh token between rotations
pub const REFRESH_COOKIE: &str = "refresh_token";

fn refresh_cookie(pair: &TokenPair) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, pair.refresh_token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::seconds(pair.refresh_expires_in as i64))
        .finish()
}

fn clear_refresh_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(REFRESH_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .finish();
    cookie.make_removal();
    cookie
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth
        .register(&body.username, &body.email, &body.password, &body.password_confirm)
        .await
    {
        Ok(user) => HttpResponse::Created().json(RegisterResponse::from(user)),
        Err(error) => domain_error_response(&error),
    }
}

/// POST /auth
///
/// Runs the login rotation protocol and answers with the access token plus
/// the user's current checkouts and waitlist; the refresh token rides an
/// httpOnly cookie.
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    let outcome = match state.auth.login(&body.identifier, &body.password, "/auth").await {
        Ok(outcome) => outcome,
        Err(error) => return domain_error_response(&error),
    };

    let checkouts = match state.library.checkouts(outcome.user.id).await {
        Ok(books) => books,
        Err(error) => return domain_error_response(&error),
    };
    let waitlist = match state.library.waitlist(outcome.user.id).await {
        Ok(books) => books,
        Err(error) => return domain_error_response(&error),
    };

    HttpResponse::Ok()
        .cookie(refresh_cookie(&outcome.tokens))
        .json(LoginResponse {
            access_token: outcome.tokens.access_token,
            expires_in: outcome.tokens.access_expires_in,
            checkouts,
            waitlist,
        })
}

/// POST /refresh
///
/// Exchanges the refresh cookie for a fresh pair; the rotation preserves
/// the remaining refresh lifetime.
pub async fn refresh(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let payload = match req.cookie(REFRESH_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            return HttpResponse::Forbidden().json(ErrorResponse::new(
                "invalid_token",
                "Missing refresh token",
            ))
        }
    };

    match state.auth.refresh(&payload, "/refresh").await {
        Ok(pair) => HttpResponse::Ok()
            .cookie(refresh_cookie(&pair))
            .json(RefreshResponse {
                access_token: pair.access_token.clone(),
                expires_in: pair.access_expires_in,
            }),
        Err(error) => domain_error_response(&error),
    }
}

/// POST /logout
///
/// Revokes the pair named by the refresh cookie and clears it. Always
/// answers 204; an unverifiable cookie just means nothing to revoke.
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Some(cookie) = req.cookie(REFRESH_COOKIE) {
        if let Err(error) = state.auth.logout(cookie.value(), "/logout").await {
            return domain_error_response(&error);
        }
    }

    HttpResponse::NoContent()
        .cookie(clear_refresh_cookie())
        .finish()
}

/// POST /forgot
pub async fn forgot_password(
    state: web::Data<AppState>,
    body: web::Json<ForgotPasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state.auth.forgot_password(&body.identifier, "/forgot").await {
        Ok(email) => HttpResponse::Ok().json(ForgotPasswordResponse { email }),
        Err(error) => domain_error_response(&error),
    }
}

/// POST /reset-password?reset=<token_id>
pub async fn reset_password(
    state: web::Data<AppState>,
    query: web::Query<ResetPasswordQuery>,
    body: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth
        .reset_password(
            query.reset,
            &body.password,
            &body.password_confirm,
            "/reset-password",
        )
        .await
    {
        Ok(()) => HttpResponse::Created().finish(),
        Err(error) => domain_error_response(&error),
    }
}
