use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use keystone_core::Claims;

use crate::error::error_response;
use crate::state::AppState;

pub const NO_TOKEN_MESSAGE: &str = "Access denied. No token provided.";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";
pub const ADMIN_REQUIRED_MESSAGE: &str = "Access denied. Admin privileges required.";

/// Token from `Authorization: Bearer <token>`, if the header is well formed.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

/// Middleware that verifies `Authorization: Bearer <token>` and attaches the
/// decoded [`Claims`] to the request. The session cookie is never consulted.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return error_response(StatusCode::UNAUTHORIZED, "unauthorized", NO_TOKEN_MESSAGE);
    };

    let claims = match state.tokens.verify(token) {
        Ok(claims) => claims,
        Err(_) => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                INVALID_TOKEN_MESSAGE,
            );
        }
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}

/// Middleware that admits only admins. Must run after [`require_bearer`].
pub async fn require_admin(request: Request, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<Claims>()
        .is_some_and(Claims::is_admin);

    if !is_admin {
        return error_response(StatusCode::FORBIDDEN, "forbidden", ADMIN_REQUIRED_MESSAGE);
    }

    next.run(request).await
}
