use serde::{Deserialize, Serialize};
use uuid::Uuid;

use keystone_core::{Claims, LoginInput, RegisterInput};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Registration body, accepted as JSON or as an HTML form.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Jane")]
    pub name: Option<String>,
    #[schema(example = "jane@x.com")]
    pub email: Option<String>,
    #[schema(example = "secret123")]
    pub password: Option<String>,
    /// `swagger` answers with a session cookie and a redirect to the docs
    pub redirect: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Login body, accepted as JSON or as an HTML form.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "jane@x.com")]
    pub email: Option<String>,
    #[schema(example = "secret123")]
    pub password: Option<String>,
    /// `swagger` answers with a session cookie and a redirect to the docs
    pub redirect: Option<String>,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Protected API
// ---------------------------------------------------------------------------

/// Decoded token claims as echoed back to the caller.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for SessionUser {
    fn from(c: Claims) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            role: c.role.to_string(),
            iat: c.iat,
            exp: c.exp,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DataItem {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DataPayload {
    pub items: Vec<DataItem>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DataResponse {
    pub message: String,
    pub data: DataPayload,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminOverviewResponse {
    pub message: String,
    pub user: SessionUser,
    pub total_users: i64,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
