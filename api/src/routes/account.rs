//! Checkout and waitlist toggling for the authenticated user.
//!
//! Each toggle answers with the refreshed list so the client can redraw
//! without a second request.

use actix_web::{web, HttpResponse};

use crate::dto::books::BookSelector;
use crate::handlers::error::domain_error_response;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// PUT /users/checkouts?book=<isbn>
pub async fn checkout(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<BookSelector>,
) -> HttpResponse {
    if let Err(error) = state.library.checkout(auth.user_id, &query.book).await {
        return domain_error_response(&error);
    }
    checkouts_body(&state, auth).await
}

/// DELETE /users/checkouts?book=<isbn>
pub async fn check_in(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<BookSelector>,
) -> HttpResponse {
    if let Err(error) = state.library.check_in(auth.user_id, &query.book).await {
        return domain_error_response(&error);
    }
    checkouts_body(&state, auth).await
}

/// PUT /users/waitlist?book=<isbn>
pub async fn join_waitlist(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<BookSelector>,
) -> HttpResponse {
    if let Err(error) = state.library.join_waitlist(auth.user_id, &query.book).await {
        return domain_error_response(&error);
    }
    waitlist_body(&state, auth).await
}

/// DELETE /users/waitlist?book=<isbn>
pub async fn leave_waitlist(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<BookSelector>,
) -> HttpResponse {
    if let Err(error) = state.library.leave_waitlist(auth.user_id, &query.book).await {
        return domain_error_response(&error);
    }
    waitlist_body(&state, auth).await
}

async fn checkouts_body(state: &web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.library.checkouts(auth.user_id).await {
        Ok(books) => HttpResponse::Ok().json(books),
        Err(error) => domain_error_response(&error),
    }
}

async fn waitlist_body(state: &web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.library.waitlist(auth.user_id).await {
        Ok(books) => HttpResponse::Ok().json(books),
        Err(error) => domain_error_response(&error),
    }
}
