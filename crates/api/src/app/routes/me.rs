use axum::{extract::Extension, response::IntoResponse, Json};

use crate::context::PrincipalContext;

/// GET /api/me - identity of the authenticated caller.
pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "id": principal.user_id().to_string(),
        "email": principal.email(),
    }))
}
