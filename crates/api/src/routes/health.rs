//! Liveness endpoint, mounted at the root (not under `/api`) so load
//! balancers and uptime probes can hit it without the API prefix.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

/// GET /health -- probes the database and reports overall service health.
///
/// Always returns 200; probes distinguish "degraded" from "down" by body,
/// not status code.
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = playrental_db::health_check(&state.pool).await.is_ok();

    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
