//! # credchain-api — Axum HTTP Service for the CredChain Registry
//!
//! Exposes the complete registry contract surface over JSON. Caller
//! identity is explicit request data on mutating operations; the
//! registry re-checks every authorization inside the mutation, so a
//! handler can never mint or revoke through a stale pre-check.
//!
//! ## API Surface
//!
//! | Prefix              | Module                  | Domain                 |
//! |---------------------|-------------------------|------------------------|
//! | `/v1/issuers/*`     | [`routes::issuers`]     | Whitelist management   |
//! | `/v1/admin/*`       | [`routes::admin`]       | Administrator role     |
//! | `/v1/credentials/*` | [`routes::credentials`] | Issue / verify / revoke|
//! | `/v1/students/*`    | [`routes::credentials`] | Per-student index      |
//! | `/v1/events`        | [`routes::events`]      | Audit log              |
//!
//! Health probes (`/health/*`) are mounted outside the API router and
//! carry no state. The OpenAPI document is served at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::issuers::router())
        .merge(routes::admin::router())
        .merge(routes::credentials::router())
        .merge(routes::events::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
