//! Catalog handlers.

use actix_web::{web, HttpResponse};

use crate::dto::books::BookSearchQuery;
use crate::handlers::error::domain_error_response;
use crate::state::AppState;

/// GET /books
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<BookSearchQuery>,
) -> HttpResponse {
    match state
        .library
        .search(&query.filter(), &query.pagination())
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(error) => domain_error_response(&error),
    }
}

/// GET /books/{isbn}
pub async fn get(state: web::Data<AppState>, isbn: web::Path<String>) -> HttpResponse {
    match state.library.get(&isbn).await {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(error) => domain_error_response(&error),
    }
}
