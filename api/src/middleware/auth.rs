//! JWT authentication middleware.
//!
//! Guards protected scopes: extracts the bearer token from the
//! Authorization header, verifies it as an ACCESS token through the token
//! service, and injects an `AuthContext` for handlers to extract.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use tracing::debug;
use uuid::Uuid;

use crate::dto::ErrorResponse;
use crate::state::AppState;

/// Authenticated caller identity injected into requests
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: Uuid,
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .copied()
                .ok_or_else(|| unauthorized("Missing authentication context")),
        )
    }
}

fn unauthorized(message: &str) -> Error {
    let response =
        HttpResponse::Unauthorized().json(ErrorResponse::new("unauthorized", message));
    InternalError::from_response(message.to_string(), response).into()
}

fn forbidden(message: &str) -> Error {
    let response = HttpResponse::Forbidden().json(ErrorResponse::new("invalid_token", message));
    InternalError::from_response(message.to_string(), response).into()
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Middleware factory guarding a scope with ACCESS-token verification
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Err(unauthorized("Missing or invalid Authorization header")),
            };

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| unauthorized("Authentication is not configured"))?;

            match state.tokens.verify_access(&token) {
                Ok(user_id) => {
                    req.extensions_mut().insert(AuthContext { user_id });
                    service.call(req).await
                }
                Err(e) => {
                    debug!("rejected access token: {}", e);
                    Err(forbidden("Token is invalid or expired"))
                }
            }
        })
    }
}
