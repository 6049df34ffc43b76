//! # Administrator API
//!
//! The single-administrator role: read who holds it, and transfer it
//! atomically to another account.
//!
//! ## Endpoints
//!
//! - `GET /v1/admin` — current administrator
//! - `POST /v1/admin/transfer` — transfer the role

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use credchain_core::AccountAddress;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to transfer the administrator role.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferAdminRequest {
    /// The account making the call. Must be the current administrator.
    pub caller: String,
    /// The account receiving the role.
    pub new_admin: String,
}

/// The current administrator.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminResponse {
    /// Administrator account, canonical lowercase.
    pub admin: String,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/admin", get(get_admin))
        .route("/v1/admin/transfer", post(transfer_admin))
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /v1/admin — Current administrator.
#[utoipa::path(
    get,
    path = "/v1/admin",
    responses(
        (status = 200, description = "Current administrator", body = AdminResponse),
    ),
    tag = "admin"
)]
pub async fn get_admin(State(state): State<AppState>) -> Json<AdminResponse> {
    Json(AdminResponse {
        admin: state.registry().admin().to_string(),
    })
}

/// POST /v1/admin/transfer — Transfer the administrator role.
#[utoipa::path(
    post,
    path = "/v1/admin/transfer",
    request_body = TransferAdminRequest,
    responses(
        (status = 200, description = "Role transferred", body = AdminResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed address", body = crate::error::ErrorBody),
    ),
    tag = "admin"
)]
pub async fn transfer_admin(
    State(state): State<AppState>,
    body: Result<Json<TransferAdminRequest>, JsonRejection>,
) -> Result<Json<AdminResponse>, AppError> {
    let req = extract_json(body)?;
    let caller = AccountAddress::new(&req.caller)?;
    let new_admin = AccountAddress::new(&req.new_admin)?;

    {
        let mut registry = state.registry_mut();
        registry.transfer_admin(&caller, new_admin.clone())?;
    }
    state.persist();

    Ok(Json(AdminResponse {
        admin: new_admin.to_string(),
    }))
}
