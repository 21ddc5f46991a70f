use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::header::{REFERER, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{require_admin, require_bearer};
use crate::docs::docs_gate;
use crate::dto::{
    AdminOverviewResponse, AuthResponse, DataItem, DataPayload, DataResponse, HealthResponse,
    LoginRequest, MessageResponse, ProfileResponse, RegisterRequest,
};
use crate::error::ApiError;
use crate::extract::{CurrentUser, FormOrJson};
use crate::openapi::ApiDoc;
use crate::session::{
    DOCS_PATH, ResponseMode, came_from_docs, clear_session_cookie, respond_with_session,
};
use crate::state::AppState;

/// OpenAPI document location, served behind the docs gate.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/api/admin/overview", get(admin_overview))
        .route_layer(middleware::from_fn(require_admin));

    let api = Router::new()
        .route("/api/profile", get(profile))
        .route("/api/data", get(data))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let docs = Router::new()
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .route_layer(middleware::from_fn_with_state(state.clone(), docs_gate));

    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
        .route("/health", get(health));

    public.merge(api).merge(docs).with_state(state)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered; token issued", body = AuthResponse),
        (status = 303, description = "Docs mode: session cookie set, redirect to /api-docs"),
        (status = 400, description = "Missing fields or email already registered", body = crate::dto::ErrorResponse),
        (status = 500, description = "Unexpected error", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    FormOrJson(body): FormOrJson<RegisterRequest>,
) -> Result<Response, ApiError> {
    let mode = ResponseMode::from_redirect(body.redirect.as_deref());
    let result = state.auth_service().register(body.into()).await?;

    Ok(respond_with_session(
        &state,
        result,
        mode,
        StatusCode::CREATED,
        "Registration successful",
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; token issued", body = AuthResponse),
        (status = 303, description = "Docs mode: session cookie set, redirect to /api-docs"),
        (status = 401, description = "Invalid email or password", body = crate::dto::ErrorResponse),
        (status = 500, description = "Unexpected error", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    FormOrJson(body): FormOrJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let mode = ResponseMode::from_redirect(body.redirect.as_deref());
    let result = state.auth_service().login(body.into()).await?;

    Ok(respond_with_session(
        &state,
        result,
        mode,
        StatusCode::OK,
        "Login successful",
    ))
}

/// Clears the docs session cookie. Bearer tokens already handed out stay
/// valid until they expire.
#[utoipa::path(
    get,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 303, description = "Came from the docs: redirect back to /api-docs"),
    ),
    tag = "auth"
)]
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let clear = AppendHeaders([(SET_COOKIE, clear_session_cookie(state.secure_cookies))]);

    let from_docs = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(came_from_docs);

    if from_docs {
        return (clear, Redirect::to(DOCS_PATH)).into_response();
    }

    let body = MessageResponse {
        message: "Logged out successfully".to_string(),
    };
    (clear, axum::Json(body)).into_response()
}

// ---------------------------------------------------------------------------
// Protected API
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Caller's token claims", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "api"
)]
pub async fn profile(CurrentUser(claims): CurrentUser) -> impl IntoResponse {
    axum::Json(ProfileResponse {
        message: "Protected profile route".to_string(),
        user: claims.into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/data",
    responses(
        (status = 200, description = "Protected data", body = DataResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "api"
)]
pub async fn data() -> impl IntoResponse {
    let items = (1..=3)
        .map(|id| DataItem {
            id,
            name: format!("Item {id}"),
        })
        .collect();

    axum::Json(DataResponse {
        message: "Protected data route".to_string(),
        data: DataPayload { items },
    })
}

#[utoipa::path(
    get,
    path = "/api/admin/overview",
    responses(
        (status = 200, description = "Admin overview", body = AdminOverviewResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 403, description = "Admin role required", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_overview(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let total_users = state.db.user_repo().count().await?;

    Ok(axum::Json(AdminOverviewResponse {
        message: "Admin overview".to_string(),
        user: claims.into(),
        total_users,
    }))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let healthy = state.db.user_repo().health_check().await.is_ok();

    let (status, response) = if healthy {
        (
            StatusCode::OK,
            HealthResponse {
                status: "healthy",
                database: "ok",
            },
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthResponse {
                status: "unhealthy",
                database: "error",
            },
        )
    };

    (status, axum::Json(response))
}
