//! # Issuer Whitelist API
//!
//! Whitelist management (administrator only) and whitelist lookups.
//!
//! ## Endpoints
//!
//! - `POST /v1/issuers` — upsert an issuer's whitelist status
//! - `GET /v1/issuers/:address` — whitelist status for one issuer

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use credchain_core::AccountAddress;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to set an issuer's whitelist status.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetIssuerStatusRequest {
    /// The account making the call. Must be the administrator.
    pub caller: String,
    /// The issuer whose status is being set.
    pub issuer: String,
    /// The new whitelist flag.
    pub whitelisted: bool,
    /// Institution name to record. May be empty when de-whitelisting.
    #[serde(default)]
    pub institution_name: String,
}

/// Whitelist status for one issuer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssuerStatusResponse {
    /// The issuer account, canonical lowercase.
    pub issuer: String,
    /// Whether the issuer may currently mint credentials.
    pub whitelisted: bool,
    /// Recorded institution name, absent if the registry has never seen
    /// this issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the issuers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/issuers", post(set_issuer_status))
        .route("/v1/issuers/:address", get(get_issuer))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/issuers — Upsert an issuer's whitelist status.
#[utoipa::path(
    post,
    path = "/v1/issuers",
    request_body = SetIssuerStatusRequest,
    responses(
        (status = 200, description = "Whitelist status updated", body = IssuerStatusResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed address", body = crate::error::ErrorBody),
    ),
    tag = "issuers"
)]
pub async fn set_issuer_status(
    State(state): State<AppState>,
    body: Result<Json<SetIssuerStatusRequest>, JsonRejection>,
) -> Result<Json<IssuerStatusResponse>, AppError> {
    let req = extract_json(body)?;
    let caller = AccountAddress::new(&req.caller)?;
    let issuer = AccountAddress::new(&req.issuer)?;

    {
        let mut registry = state.registry_mut();
        registry.set_issuer_status(
            &caller,
            issuer.clone(),
            req.whitelisted,
            req.institution_name.clone(),
        )?;
    }
    state.persist();

    Ok(Json(IssuerStatusResponse {
        issuer: issuer.to_string(),
        whitelisted: req.whitelisted,
        institution_name: Some(req.institution_name),
    }))
}

/// GET /v1/issuers/:address — Whitelist status for one issuer.
///
/// Total lookup: unknown issuers answer `whitelisted: false` rather
/// than 404, matching the registry's default-false semantics.
#[utoipa::path(
    get,
    path = "/v1/issuers/{address}",
    params(("address" = String, Path, description = "Issuer account address")),
    responses(
        (status = 200, description = "Whitelist status", body = IssuerStatusResponse),
        (status = 422, description = "Malformed address", body = crate::error::ErrorBody),
    ),
    tag = "issuers"
)]
pub async fn get_issuer(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<IssuerStatusResponse>, AppError> {
    let issuer = AccountAddress::new(&address)?;
    let registry = state.registry();
    let record = registry.issuer_record(&issuer);

    Ok(Json(IssuerStatusResponse {
        issuer: issuer.to_string(),
        whitelisted: record.is_some_and(|r| r.whitelisted),
        institution_name: record.map(|r| r.institution_name.clone()),
    }))
}
