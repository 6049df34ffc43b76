//! # Credential Issuance, Verification & Revocation API
//!
//! The credential side of the contract surface: issuance by whitelisted
//! issuers, the two read paths (verify never fails, details 404s), the
//! validity flag, the ordered indices, and issuer-scoped revocation.
//!
//! ## Endpoints
//!
//! - `POST /v1/credentials` — issue, returns the new EduID
//! - `GET /v1/credentials` — global EduID list, issuance order
//! - `GET /v1/credentials/count` — total issued
//! - `GET /v1/credentials/:edu_id` — details (404 when absent)
//! - `GET /v1/credentials/:edu_id/verify` — existence flag + record
//! - `GET /v1/credentials/:edu_id/valid` — exists and not revoked
//! - `POST /v1/credentials/:edu_id/revoke` — revoke (issuer only)
//! - `GET /v1/students/:address/credentials` — per-student EduID list

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use credchain_core::{AccountAddress, DocumentHash, EduId};
use credchain_registry::{CredentialRecord, IssueRequest};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to issue a credential.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueCredentialRequest {
    /// The issuing account. Must be whitelisted.
    pub caller: String,
    /// The student (holder) account.
    pub student_wallet: String,
    /// Student display name.
    pub student_name: String,
    /// Institution display name.
    pub institution_name: String,
    /// Credential type (degree, diploma, certificate, ...).
    pub credential_type: String,
    /// Course or program free text.
    pub course_or_program: String,
    /// SHA-256 document digest as hex, with or without 0x prefix.
    pub document_hash: String,
}

impl Validate for IssueCredentialRequest {
    fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("student_name", &self.student_name),
            ("institution_name", &self.institution_name),
            ("credential_type", &self.credential_type),
            ("course_or_program", &self.course_or_program),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} must not be empty"));
            }
        }
        Ok(())
    }
}

/// Response to a successful issuance.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssueCredentialResponse {
    /// The newly assigned EduID.
    pub edu_id: String,
}

/// A credential record as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CredentialDto {
    /// Globally unique credential identifier.
    pub edu_id: String,
    /// Issuing account.
    pub issuer: String,
    /// Student (holder) account.
    pub student_wallet: String,
    /// Student display name.
    pub student_name: String,
    /// Institution display name.
    pub institution_name: String,
    /// Credential type.
    pub credential_type: String,
    /// Course or program free text.
    pub course_or_program: String,
    /// Issuance time, ISO 8601 UTC.
    pub issued_at: String,
    /// SHA-256 document digest, 0x-prefixed hex.
    pub document_hash: String,
    /// Whether the credential has been revoked.
    pub revoked: bool,
}

impl From<&CredentialRecord> for CredentialDto {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            edu_id: record.edu_id.to_string(),
            issuer: record.issuer.to_string(),
            student_wallet: record.student_wallet.to_string(),
            student_name: record.student_name.clone(),
            institution_name: record.institution_name.clone(),
            credential_type: record.credential_type.clone(),
            course_or_program: record.course_or_program.clone(),
            issued_at: record.issued_at.to_canonical_string(),
            document_hash: record.document_hash.to_hex(),
            revoked: record.revoked,
        }
    }
}

/// Result of the primary verification lookup. Always 200.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    /// Whether a credential with the queried EduID exists.
    pub exists: bool,
    /// The record, present iff `exists`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<CredentialDto>,
}

/// Validity flag for one credential.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidityResponse {
    /// True iff the credential exists and is not revoked.
    pub valid: bool,
}

/// Total number of credentials issued.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    /// Count of all credentials ever issued, revoked ones included.
    pub count: u64,
}

/// Request to revoke a credential.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RevokeCredentialRequest {
    /// The account making the call. Must be the credential's issuer.
    pub caller: String,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the credentials router, including the per-student index route.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/credentials", get(list_credentials).post(issue_credential))
        .route("/v1/credentials/count", get(credential_count))
        .route("/v1/credentials/:edu_id", get(get_credential))
        .route("/v1/credentials/:edu_id/verify", get(verify_credential))
        .route("/v1/credentials/:edu_id/valid", get(credential_valid))
        .route("/v1/credentials/:edu_id/revoke", post(revoke_credential))
        .route("/v1/students/:address/credentials", get(student_credentials))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/credentials — Issue a credential.
///
/// Returns the generated EduID directly; there is no need to re-query
/// the student's index to learn it.
#[utoipa::path(
    post,
    path = "/v1/credentials",
    request_body = IssueCredentialRequest,
    responses(
        (status = 201, description = "Credential issued", body = IssueCredentialResponse),
        (status = 403, description = "Caller is not whitelisted", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed address, hash, or empty field", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn issue_credential(
    State(state): State<AppState>,
    body: Result<Json<IssueCredentialRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IssueCredentialResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let caller = AccountAddress::new(&req.caller)?;
    let request = IssueRequest {
        student_wallet: AccountAddress::new(&req.student_wallet)?,
        student_name: req.student_name,
        institution_name: req.institution_name,
        credential_type: req.credential_type,
        course_or_program: req.course_or_program,
        document_hash: DocumentHash::from_hex(&req.document_hash)?,
    };

    let edu_id = {
        let mut registry = state.registry_mut();
        registry.issue_credential(&caller, request)?
    };
    state.persist();

    Ok((
        StatusCode::CREATED,
        Json(IssueCredentialResponse {
            edu_id: edu_id.to_string(),
        }),
    ))
}

/// GET /v1/credentials — Global EduID list in issuance order.
#[utoipa::path(
    get,
    path = "/v1/credentials",
    responses(
        (status = 200, description = "All EduIDs in issuance order", body = Vec<String>),
    ),
    tag = "credentials"
)]
pub async fn list_credentials(State(state): State<AppState>) -> Json<Vec<String>> {
    let registry = state.registry();
    Json(
        registry
            .all_credentials()
            .iter()
            .map(|id| id.to_string())
            .collect(),
    )
}

/// GET /v1/credentials/count — Total credentials issued.
#[utoipa::path(
    get,
    path = "/v1/credentials/count",
    responses(
        (status = 200, description = "Credential count", body = CountResponse),
    ),
    tag = "credentials"
)]
pub async fn credential_count(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.registry().credential_count() as u64,
    })
}

/// GET /v1/credentials/:edu_id — Credential details.
///
/// This is the exceptional-absence path: an unknown EduID is a 404,
/// unlike the verify path below.
#[utoipa::path(
    get,
    path = "/v1/credentials/{edu_id}",
    params(("edu_id" = String, Path, description = "Credential EduID")),
    responses(
        (status = 200, description = "Credential record", body = CredentialDto),
        (status = 404, description = "Unknown EduID", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed EduID", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn get_credential(
    State(state): State<AppState>,
    Path(edu_id): Path<String>,
) -> Result<Json<CredentialDto>, AppError> {
    let edu_id = EduId::new(edu_id)?;
    let registry = state.registry();
    let record = registry.credential_details(&edu_id)?;
    Ok(Json(CredentialDto::from(record)))
}

/// GET /v1/credentials/:edu_id/verify — Existence flag + record.
///
/// Never fails for unknown or malformed identifiers: both answer
/// `exists: false`, so callers distinguish "not found" from transport
/// errors by channel, not by guessing at status codes.
#[utoipa::path(
    get,
    path = "/v1/credentials/{edu_id}/verify",
    params(("edu_id" = String, Path, description = "Credential EduID")),
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
    ),
    tag = "credentials"
)]
pub async fn verify_credential(
    State(state): State<AppState>,
    Path(edu_id): Path<String>,
) -> Json<VerifyResponse> {
    let Ok(edu_id) = EduId::new(edu_id) else {
        return Json(VerifyResponse {
            exists: false,
            credential: None,
        });
    };
    let registry = state.registry();
    let verification = registry.verify_credential(&edu_id);
    Json(VerifyResponse {
        exists: verification.exists,
        credential: verification.record.as_ref().map(CredentialDto::from),
    })
}

/// GET /v1/credentials/:edu_id/valid — Exists and not revoked.
#[utoipa::path(
    get,
    path = "/v1/credentials/{edu_id}/valid",
    params(("edu_id" = String, Path, description = "Credential EduID")),
    responses(
        (status = 200, description = "Validity flag", body = ValidityResponse),
    ),
    tag = "credentials"
)]
pub async fn credential_valid(
    State(state): State<AppState>,
    Path(edu_id): Path<String>,
) -> Json<ValidityResponse> {
    let valid = match EduId::new(edu_id) {
        Ok(edu_id) => state.registry().is_credential_valid(&edu_id),
        Err(_) => false,
    };
    Json(ValidityResponse { valid })
}

/// POST /v1/credentials/:edu_id/revoke — Revoke a credential.
#[utoipa::path(
    post,
    path = "/v1/credentials/{edu_id}/revoke",
    params(("edu_id" = String, Path, description = "Credential EduID")),
    request_body = RevokeCredentialRequest,
    responses(
        (status = 200, description = "Credential revoked", body = CredentialDto),
        (status = 403, description = "Caller did not issue this credential", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown EduID", body = crate::error::ErrorBody),
        (status = 409, description = "Already revoked", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn revoke_credential(
    State(state): State<AppState>,
    Path(edu_id): Path<String>,
    body: Result<Json<RevokeCredentialRequest>, JsonRejection>,
) -> Result<Json<CredentialDto>, AppError> {
    let req = crate::extractors::extract_json(body)?;
    let caller = AccountAddress::new(&req.caller)?;
    let edu_id = EduId::new(edu_id)?;

    let dto = {
        let mut registry = state.registry_mut();
        registry.revoke_credential(&caller, &edu_id)?;
        CredentialDto::from(registry.credential_details(&edu_id)?)
    };
    state.persist();

    Ok(Json(dto))
}

/// GET /v1/students/:address/credentials — Per-student EduID list.
#[utoipa::path(
    get,
    path = "/v1/students/{address}/credentials",
    params(("address" = String, Path, description = "Student account address")),
    responses(
        (status = 200, description = "EduIDs in issuance order, possibly empty", body = Vec<String>),
        (status = 422, description = "Malformed address", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn student_credentials(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let student = AccountAddress::new(&address)?;
    let registry = state.registry();
    Ok(Json(
        registry
            .student_credentials(&student)
            .iter()
            .map(|id| id.to_string())
            .collect(),
    ))
}
