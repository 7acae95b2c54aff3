//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every form route, the listings, the health checks,
//! the error payload and the session cookie security scheme. The document
//! backs Swagger UI in debug builds.

use crate::domain::{Error, ErrorCode};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login or POST /register.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Worklog API",
        description = "Session-authenticated tracking of jobs and departments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login_form,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::register_form,
        crate::inbound::http::users::register,
        crate::inbound::http::users::current_user,
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::job_form,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::edit_job,
        crate::inbound::http::jobs::update_job,
        crate::inbound::http::jobs::delete_job,
        crate::inbound::http::departments::list_departments,
        crate::inbound::http::departments::department_form,
        crate::inbound::http::departments::create_department,
        crate::inbound::http::departments::edit_department,
        crate::inbound::http::departments::update_department,
        crate::inbound::http::departments::delete_department,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "users", description = "Login, logout, registration and profile"),
        (name = "jobs", description = "Work listing and job forms"),
        (name = "departments", description = "Department listing and forms"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
