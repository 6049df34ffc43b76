//! # Audit Log API
//!
//! Read access to the append-only event log. Observable by any caller,
//! mirroring the public event stream of the registry.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use credchain_registry::RegistryEvent;

use crate::state::AppState;

/// Build the events router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/events", get(list_events))
}

/// GET /v1/events — The audit log, oldest first.
#[utoipa::path(
    get,
    path = "/v1/events",
    responses(
        (status = 200, description = "Audit events, oldest first"),
    ),
    tag = "events"
)]
pub async fn list_events(State(state): State<AppState>) -> Json<Vec<RegistryEvent>> {
    Json(state.registry().events().to_vec())
}
