use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use innkeep_infra::queries;

use crate::app::AppServices;

/// GET /api/health - liveness/readiness: is the rooms table queryable?
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match queries::probe_rooms(services.backend.as_ref()).await {
        Ok(()) => (StatusCode::OK, Json(json!({"status": "ok"}))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "health probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "unhealthy"})),
            )
                .into_response()
        }
    }
}
