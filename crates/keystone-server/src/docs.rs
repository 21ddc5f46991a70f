//! Cookie gate in front of the Swagger UI.
//!
//! Browsers cannot attach a bearer header to page loads, so the docs use the
//! `token` cookie instead. Without a valid cookie the gate answers with an
//! inline sign-in page on the same path.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{CACHE_CONTROL, SET_COOKIE};
use axum::middleware::Next;
use axum::response::{AppendHeaders, Html, IntoResponse, Response};

use crate::session::{clear_session_cookie, token_from_cookie};
use crate::state::AppState;

/// Sign-in page served by [`docs_gate`]. Both forms post back with
/// `redirect=swagger` so the auth handlers answer with a cookie.
pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Keystone API Documentation - Sign in</title>
  <style>
    body { font-family: system-ui, sans-serif; background: #f4f5f7; margin: 0;
           min-height: 100vh; display: flex; align-items: center; justify-content: center; }
    main { display: flex; gap: 2rem; flex-wrap: wrap; justify-content: center; }
    section { background: #fff; border-radius: 8px; padding: 2rem; width: 320px;
              box-shadow: 0 2px 10px rgba(0, 0, 0, 0.08); }
    h1 { width: 100%; text-align: center; color: #222; margin: 0 0 1rem; }
    h2 { margin-top: 0; color: #333; }
    label { display: block; margin: 0.75rem 0 0.25rem; color: #555; }
    input { width: 100%; box-sizing: border-box; padding: 0.6rem; border: 1px solid #ccc;
            border-radius: 4px; font-size: 1rem; }
    button { margin-top: 1.25rem; width: 100%; padding: 0.7rem; border: 0; border-radius: 4px;
             background: #2f5bd3; color: #fff; font-size: 1rem; cursor: pointer; }
    button:hover { background: #2449ad; }
  </style>
</head>
<body>
  <main>
    <h1>API Documentation</h1>
    <section>
      <h2>Sign in</h2>
      <form action="/auth/login" method="POST">
        <input type="hidden" name="redirect" value="swagger">
        <label for="login-email">Email</label>
        <input type="email" id="login-email" name="email" required>
        <label for="login-password">Password</label>
        <input type="password" id="login-password" name="password" required>
        <button type="submit">Sign in</button>
      </form>
    </section>
    <section>
      <h2>Create account</h2>
      <form action="/auth/register" method="POST">
        <input type="hidden" name="redirect" value="swagger">
        <label for="register-name">Name</label>
        <input type="text" id="register-name" name="name" required>
        <label for="register-email">Email</label>
        <input type="email" id="register-email" name="email" required>
        <label for="register-password">Password</label>
        <input type="password" id="register-password" name="password" required minlength="6">
        <button type="submit">Register</button>
      </form>
    </section>
  </main>
</body>
</html>
"#;

fn login_page() -> impl IntoResponse {
    ([(CACHE_CONTROL, "no-store")], Html(LOGIN_PAGE))
}

/// Middleware for every docs route: pass through with a valid `token` cookie,
/// otherwise serve [`LOGIN_PAGE`] (clearing the cookie if it was invalid).
pub async fn docs_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = token_from_cookie(request.headers()) else {
        tracing::debug!("No docs session cookie; serving sign-in page");
        return login_page().into_response();
    };

    match state.tokens.verify(&token) {
        Ok(claims) => {
            tracing::debug!(user_id = %claims.id, "Docs session accepted");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(_) => {
            tracing::info!("Rejected docs session cookie; clearing it");
            (
                AppendHeaders([(SET_COOKIE, clear_session_cookie(state.secure_cookies))]),
                login_page(),
            )
                .into_response()
        }
    }
}
