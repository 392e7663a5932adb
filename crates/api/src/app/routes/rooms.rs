use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use innkeep_core::RoomSummary;
use innkeep_infra::queries;

use crate::app::{errors, AppServices};

#[derive(Debug, Serialize)]
pub struct RoomsResponse {
    pub rooms: Vec<RoomSummary>,
}

/// GET /api/rooms - active rooms ordered by room number.
///
/// Always evaluated against the backend; responses are marked uncacheable.
pub async fn list_rooms(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match queries::list_active_rooms(services.backend.as_ref()).await {
        Ok(rooms) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, "no-store")],
            Json(RoomsResponse { rooms }),
        )
            .into_response(),
        Err(e) => errors::backend_error_to_response(&e, "failed to load rooms"),
    }
}
