use atelier_cms::{queries, QueryParams};
use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every backing service answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    pub cms_healthy: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let params = QueryParams::new();
    let (db, cms) = tokio::join!(
        atelier_db::health_check(&state.pool),
        state.cms.query(queries::PROBE, &params),
    );
    let db_healthy = db.is_ok();
    let cms_healthy = match cms {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "CMS health probe failed");
            false
        }
    };

    let status = if db_healthy && cms_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cms_healthy,
    })
}

/// Mount health check routes (root level, outside the locale prefix).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
