//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CredChain Registry API",
        version = "0.1.0",
        description = "Credential registry service: issuer whitelist management, credential issuance with unique EduIDs, verification, revocation, and the append-only audit log.",
        license(name = "MIT")
    ),
    paths(
        // Issuers
        crate::routes::issuers::set_issuer_status,
        crate::routes::issuers::get_issuer,
        // Admin
        crate::routes::admin::get_admin,
        crate::routes::admin::transfer_admin,
        // Credentials
        crate::routes::credentials::issue_credential,
        crate::routes::credentials::list_credentials,
        crate::routes::credentials::credential_count,
        crate::routes::credentials::get_credential,
        crate::routes::credentials::verify_credential,
        crate::routes::credentials::credential_valid,
        crate::routes::credentials::revoke_credential,
        crate::routes::credentials::student_credentials,
        // Events
        crate::routes::events::list_events,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Issuer DTOs
        crate::routes::issuers::SetIssuerStatusRequest,
        crate::routes::issuers::IssuerStatusResponse,
        // Admin DTOs
        crate::routes::admin::TransferAdminRequest,
        crate::routes::admin::AdminResponse,
        // Credential DTOs
        crate::routes::credentials::IssueCredentialRequest,
        crate::routes::credentials::IssueCredentialResponse,
        crate::routes::credentials::CredentialDto,
        crate::routes::credentials::VerifyResponse,
        crate::routes::credentials::ValidityResponse,
        crate::routes::credentials::CountResponse,
        crate::routes::credentials::RevokeCredentialRequest,
    )),
    tags(
        (name = "issuers", description = "Issuer whitelist management"),
        (name = "admin", description = "Administrator role"),
        (name = "credentials", description = "Credential issuance, verification, and revocation"),
        (name = "events", description = "Append-only audit log"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
