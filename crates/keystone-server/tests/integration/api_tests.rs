use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use keystone_core::{Role, TokenService};

use crate::integration::common::{TEST_JWT_SECRET, setup_test_app, setup_test_app_in};

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn jane() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane",
        "email": "jane@x.com",
        "password": "secret12"
    })
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "ok");
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_token_for_new_user() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(post_json("/auth/register", jane()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Registration successful");

    let token = json["token"].as_str().unwrap();
    let claims = TokenService::new(TEST_JWT_SECRET)
        .unwrap()
        .verify(token)
        .unwrap();
    assert_eq!(claims.name, "Jane");
    assert_eq!(claims.email, "jane@x.com");
    assert_eq!(claims.role, Role::User);
    assert_eq!(claims.exp - claims.iat, 86_400);
}

#[tokio::test]
async fn register_ignores_requested_role() {
    let app = setup_test_app().await;

    let mut body = jane();
    body["role"] = serde_json::json!("admin");

    let response = app
        .router
        .oneshot(post_json("/auth/register", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let claims = app
        .state
        .tokens
        .verify(json["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.role, Role::User);
}

#[tokio::test]
async fn duplicate_email_returns_400() {
    let app = setup_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(post_json("/auth/register", jane()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .router
        .oneshot(post_json("/auth/register", jane()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "conflict");
    assert_eq!(json["message"], "User with this email already exists");
}

#[tokio::test]
async fn register_from_docs_sets_cookie_and_redirects() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(post_form(
            "/auth/register",
            "name=Jane&email=jane%40x.com&password=secret12&redirect=swagger",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/api-docs");

    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(!cookie.contains("Secure"));
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_token() {
    let app = setup_test_app().await;
    app.create_user("Jane", "jane@x.com", "secret12", Role::User)
        .await;

    let response = app
        .router
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "email": "jane@x.com", "password": "secret12" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Login successful");
    let claims = app
        .state
        .tokens
        .verify(json["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.email, "jane@x.com");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = setup_test_app().await;
    app.create_user("Jane", "jane@x.com", "secret12", Role::User)
        .await;

    let wrong_password = app
        .router
        .clone()
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "email": "jane@x.com", "password": "nope" }),
        ))
        .await
        .unwrap();
    let unknown_email = app
        .router
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "email": "ghost@x.com", "password": "secret12" }),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
}

#[tokio::test]
async fn login_email_is_case_sensitive() {
    let app = setup_test_app().await;
    app.create_user("Jane", "jane@x.com", "secret12", Role::User)
        .await;

    let response = app
        .router
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "email": "JANE@x.com", "password": "secret12" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn docs_login_flow_unlocks_swagger() {
    let app = setup_test_app().await;
    app.create_user("Jane", "jane@x.com", "secret12", Role::User)
        .await;

    let response = app
        .router
        .clone()
        .oneshot(post_form(
            "/auth/login",
            "email=jane%40x.com&password=secret12&redirect=swagger",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/api-docs");

    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    let pair = set_cookie.split(';').next().unwrap().to_string();

    let response = app
        .router
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .header(COOKIE, pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/api/profile"].is_object());
}

#[tokio::test]
async fn docs_login_cookie_is_secure_in_production() {
    let app = setup_test_app_in("production").await;
    app.create_user("Jane", "jane@x.com", "secret12", Role::User)
        .await;

    let response = app
        .router
        .oneshot(post_form(
            "/auth/login",
            "email=jane%40x.com&password=secret12&redirect=swagger",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.ends_with("; Secure"), "{cookie}");
}

#[tokio::test]
async fn failed_docs_login_returns_json_error() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(post_form(
            "/auth/login",
            "email=ghost%40x.com&password=secret12&redirect=swagger",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!response.headers().contains_key(SET_COOKIE));
}

// ---------------------------------------------------------------------------
// Protected routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn registered_token_reaches_profile() {
    let app = setup_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(post_json("/auth/register", jane()))
        .await
        .unwrap();
    let token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .router
        .oneshot(
            Request::get("/api/profile")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["name"], "Jane");
    assert_eq!(json["user"]["role"], "user");
}

#[tokio::test]
async fn admin_overview_counts_users() {
    let app = setup_test_app().await;
    app.create_user("Root", "root@x.com", "secret12", Role::Admin)
        .await;
    app.create_user("Jane", "jane@x.com", "secret12", Role::User)
        .await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "email": "root@x.com", "password": "secret12" }),
        ))
        .await
        .unwrap();
    let token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .router
        .oneshot(
            Request::get("/api/admin/overview")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_users"], 2);
    assert_eq!(json["user"]["role"], "admin");
}
