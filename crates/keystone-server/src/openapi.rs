use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Keystone API",
        version = "0.1.0",
        description = "Registration, login and token-protected endpoints."
    ),
    paths(
        crate::routes::register,
        crate::routes::login,
        crate::routes::logout,
        crate::routes::profile,
        crate::routes::data,
        crate::routes::admin_overview,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::RegisterRequest,
        crate::dto::LoginRequest,
        crate::dto::AuthResponse,
        crate::dto::MessageResponse,
        crate::dto::SessionUser,
        crate::dto::ProfileResponse,
        crate::dto::DataItem,
        crate::dto::DataPayload,
        crate::dto::DataResponse,
        crate::dto::AdminOverviewResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login and logout"),
        (name = "api", description = "Endpoints requiring a bearer token"),
        (name = "admin", description = "Endpoints requiring the admin role"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the JWT bearer security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /auth/login or /auth/register."))
                        .build(),
                ),
            );
        }
    }
}
