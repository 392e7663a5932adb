use std::sync::Arc;

use axum::{extract::State, middleware::Next, response::Response};

use innkeep_auth::RoleSet;
use innkeep_infra::Backend;

use crate::app::errors;
use crate::authz;
use crate::context::PrincipalContext;

/// State for one guarded group of routes.
#[derive(Clone)]
pub struct GuardState {
    pub backend: Arc<dyn Backend>,
    pub allowed: RoleSet,
}

impl GuardState {
    pub fn new(backend: Arc<dyn Backend>, allowed: RoleSet) -> Self {
        Self { backend, allowed }
    }
}

/// Run the role guard and translate its failures into 401/403 responses.
pub async fn require_role_middleware(
    State(state): State<GuardState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let user = match authz::require_role(req.headers(), state.backend.as_ref(), &state.allowed).await {
        Ok(user) => user,
        Err(e) => return errors::authz_error_to_response(&e),
    };

    req.extensions_mut().insert(PrincipalContext::new(user));
    next.run(req).await
}
