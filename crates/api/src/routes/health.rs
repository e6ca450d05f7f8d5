//! Health check endpoint handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::extractors::OptionalPrincipal;
use crate::response::ApiResponse;
use domain::models::AccessScope;

/// Health payload.
#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
    /// Effective data scope of the caller: `all`, `owned`, or `anonymous`.
    pub scope: String,
}

/// Database health status.
#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// GET /api/v1/health
///
/// Liveness plus database connectivity. No auth required; a valid token,
/// if supplied, is reflected as the caller's effective scope.
pub async fn health_check(
    State(state): State<AppState>,
    OptionalPrincipal(principal): OptionalPrincipal,
) -> impl IntoResponse {
    let start = std::time::Instant::now();
    let db_connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let latency_ms = start.elapsed().as_millis() as u64;

    let scope = principal
        .map(|p| AccessScope::for_principal(&p).label())
        .unwrap_or("anonymous")
        .to_string();

    let data = HealthData {
        status: if db_connected { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseHealth {
            connected: db_connected,
            latency_ms: db_connected.then_some(latency_ms),
        },
        scope,
    };

    let status = if db_connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ApiResponse::ok("Health check", data)))
}
