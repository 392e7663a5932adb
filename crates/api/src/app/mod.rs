//! HTTP API application wiring (Axum router + backend wiring).
//!
//! - `routes/`: HTTP handlers (one file per endpoint group)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Extension, Router};
use tower::ServiceBuilder;

use innkeep_auth::RoleSet;
use innkeep_infra::Backend;

use crate::middleware::{self, GuardState};

pub mod errors;
pub mod routes;

/// Shared, immutable per-process services handed to every handler.
pub struct AppServices {
    pub backend: Arc<dyn Backend>,
}

/// Route-level switches taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    /// Serve the room listing without a role check.
    pub rooms_public_read: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            rooms_public_read: true,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(backend: Arc<dyn Backend>, options: RouteOptions) -> Router {
    let services = Arc::new(AppServices {
        backend: backend.clone(),
    });
    let staff_guard = GuardState::new(backend, RoleSet::any_staff());

    let mut rooms = Router::new().route("/rooms", get(routes::rooms::list_rooms));
    if !options.rooms_public_read {
        rooms = rooms.route_layer(from_fn_with_state(
            staff_guard.clone(),
            middleware::require_role_middleware,
        ));
    }

    // Protected routes: any staff role.
    let protected = Router::new()
        .route("/me", get(routes::me::whoami))
        .route_layer(from_fn_with_state(
            staff_guard,
            middleware::require_role_middleware,
        ));

    let api = Router::new()
        .route("/health", get(routes::health::health))
        .merge(rooms)
        .merge(protected);

    tracing::info!(rooms_public_read = options.rooms_public_read, "router built");

    Router::new()
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
