use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use innkeep_auth::AuthzError;
use innkeep_infra::BackendError;

pub fn authz_error_to_response(err: &AuthzError) -> axum::response::Response {
    match err {
        AuthzError::Unauthorized(reason) => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", reason.clone())
        }
        AuthzError::Forbidden => {
            json_error(StatusCode::FORBIDDEN, "forbidden", "insufficient role for this operation")
        }
    }
}

/// Log the backend failure in full; tell the client only `message`.
pub fn backend_error_to_response(err: &BackendError, message: &'static str) -> axum::response::Response {
    tracing::error!(error = %err, "{message}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
