//! Presentation of a successful login: JSON for API clients, or a session
//! cookie plus redirect for the documentation UI.

use axum::Json;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum_extra::headers::{Cookie, HeaderMapExt};
use url::Url;

use keystone_core::AuthResult;

use crate::dto::AuthResponse;
use crate::state::AppState;

/// Name of the cookie that carries the docs session token.
pub const TOKEN_COOKIE: &str = "token";

/// Where the documentation UI is mounted.
pub const DOCS_PATH: &str = "/api-docs";

/// How a register/login result reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Json,
    DocsCookie,
}

impl ResponseMode {
    /// `redirect=swagger` selects the cookie mode.
    pub fn from_redirect(redirect: Option<&str>) -> Self {
        match redirect {
            Some("swagger") => ResponseMode::DocsCookie,
            _ => ResponseMode::Json,
        }
    }
}

fn cookie_attributes(max_age: i64, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}{secure}")
}

/// `Set-Cookie` value carrying `token` for `max_age` seconds.
pub fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    format!("{TOKEN_COOKIE}={token}; {}", cookie_attributes(max_age, secure))
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    format!("{TOKEN_COOKIE}=; {}", cookie_attributes(0, secure))
}

/// Session token from the `Cookie` header, if any. Never looks at
/// `Authorization`.
pub fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookies| cookies.get(TOKEN_COOKIE).map(str::to_owned))
        .filter(|token| !token.is_empty())
}

/// Whether a `Referer` points into the documentation UI.
pub fn came_from_docs(referer: &str) -> bool {
    match Url::parse(referer) {
        Ok(url) => url.path().starts_with(DOCS_PATH),
        Err(_) => referer.contains("api-docs"),
    }
}

/// Turn a successful [`AuthResult`] into the response `mode` asks for.
pub fn respond_with_session(
    state: &AppState,
    result: AuthResult,
    mode: ResponseMode,
    status: StatusCode,
    message: &str,
) -> Response {
    match mode {
        ResponseMode::Json => (
            status,
            Json(AuthResponse {
                message: message.to_string(),
                token: result.token,
            }),
        )
            .into_response(),
        ResponseMode::DocsCookie => {
            tracing::debug!(user_id = %result.claims.id, "Setting docs session cookie");
            let cookie = session_cookie(
                &result.token,
                state.tokens.ttl().num_seconds(),
                state.secure_cookies,
            );
            (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(DOCS_PATH)).into_response()
        }
    }
}
