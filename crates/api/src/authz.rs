//! Role guard for protected operations.
//!
//! Resolves the caller from the bearer token, then checks the caller's
//! profile role against the operation's allowed set. Steps run strictly in
//! order and stop at the first failure.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use innkeep_auth::{authorize, extract_bearer, AuthenticatedUser, AuthzError, RoleSet};
use innkeep_infra::{queries, Backend};

/// Admit the request only if its caller holds one of `allowed`.
///
/// Returns the verified identity. Fails with `Unauthorized` (before touching
/// the backend) when the bearer credential is missing or malformed, or when
/// the backend does not recognise it; with `Forbidden` when the caller has no
/// usable profile or its role is not allowed.
pub async fn require_role(
    headers: &HeaderMap,
    backend: &dyn Backend,
    allowed: &RoleSet,
) -> Result<AuthenticatedUser, AuthzError> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AuthzError::unauthorized("authorization header is not valid ASCII"))?,
        ),
        None => None,
    };
    let token = extract_bearer(header)?;

    let user = match backend.verify_token(token).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AuthzError::unauthorized("invalid or expired token")),
        Err(e) => {
            tracing::warn!(error = %e, "token verification failed");
            return Err(AuthzError::unauthorized("token verification failed"));
        }
    };

    // Lookup failures fail closed: no profile, no access.
    let profile = match queries::find_profile(backend, user.id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "profile lookup failed");
            None
        }
    };

    match authorize(profile.as_ref(), allowed) {
        Ok(role) => {
            tracing::debug!(user_id = %user.id, role = %role, "role check passed");
            Ok(user)
        }
        Err(e) => {
            tracing::info!(user_id = %user.id, allowed = %allowed, "role check rejected");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use innkeep_auth::{Profile, Role};
    use innkeep_core::UserId;
    use innkeep_infra::InMemoryBackend;
    use serde_json::json;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    /// Backend with one user holding `role`, reachable through token "tok".
    fn backend_with(role: Role) -> (InMemoryBackend, AuthenticatedUser) {
        let backend = InMemoryBackend::new();
        let user = AuthenticatedUser::new(UserId::new()).with_email("desk@innkeep.example");
        backend.register_token("tok", user.clone());
        backend.insert_profile(Profile { id: user.id, role });
        (backend, user)
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized_without_backend_calls() {
        let (backend, _) = backend_with(Role::Admin);

        let err = require_role(&HeaderMap::new(), &backend, &RoleSet::any_staff())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthzError::Unauthorized(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn header_without_bearer_prefix_is_unauthorized_without_backend_calls() {
        let (backend, _) = backend_with(Role::Admin);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("tok"));

        let err = require_role(&headers, &backend, &RoleSet::any_staff())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthzError::Unauthorized(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn staff_is_forbidden_from_admin_manager_set() {
        let (backend, _) = backend_with(Role::Staff);
        let allowed = RoleSet::new(&[Role::Admin, Role::Manager]).unwrap();

        let err = require_role(&bearer("tok"), &backend, &allowed).await.unwrap_err();
        assert_eq!(err, AuthzError::Forbidden);
    }

    #[tokio::test]
    async fn admin_is_admitted_and_identity_returned() {
        let (backend, user) = backend_with(Role::Admin);

        let got = require_role(&bearer("tok"), &backend, &RoleSet::only(Role::Admin))
            .await
            .unwrap();

        assert_eq!(got, user);
        // Identity verification + profile lookup, nothing else.
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let (backend, _) = backend_with(Role::Admin);

        let err = require_role(&bearer("other"), &backend, &RoleSet::any_staff())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthzError::Unauthorized(_)));
        // Profile lookup never attempted.
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn verification_outage_is_unauthorized() {
        let (backend, _) = backend_with(Role::Admin);
        backend.fail_with("auth service down");

        let err = require_role(&bearer("tok"), &backend, &RoleSet::any_staff())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthzError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn verified_user_without_profile_is_forbidden() {
        let backend = InMemoryBackend::new();
        backend.register_token("tok", AuthenticatedUser::new(UserId::new()));

        let err = require_role(&bearer("tok"), &backend, &RoleSet::any_staff())
            .await
            .unwrap_err();

        assert_eq!(err, AuthzError::Forbidden);
    }

    #[tokio::test]
    async fn unreadable_profile_is_forbidden() {
        let backend = InMemoryBackend::new();
        let user = AuthenticatedUser::new(UserId::new());
        backend.register_token("tok", user.clone());
        backend.insert_row(Profile::TABLE, json!({"id": user.id.to_string(), "role": "GUEST"}));

        let err = require_role(&bearer("tok"), &backend, &RoleSet::any_staff())
            .await
            .unwrap_err();

        assert_eq!(err, AuthzError::Forbidden);
    }

    #[tokio::test]
    async fn ambiguous_profile_is_forbidden() {
        let (backend, user) = backend_with(Role::Admin);
        backend.insert_profile(Profile {
            id: user.id,
            role: Role::Staff,
        });

        let err = require_role(&bearer("tok"), &backend, &RoleSet::any_staff())
            .await
            .unwrap_err();

        assert_eq!(err, AuthzError::Forbidden);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn profile_outage_after_verification_is_forbidden() {
        let (backend, _) = backend_with(Role::Admin);
        // Token verification succeeds; the profile read hits the outage.
        backend.fail_with_after(1, "profiles unavailable");

        let err = require_role(&bearer("tok"), &backend, &RoleSet::any_staff())
            .await
            .unwrap_err();

        assert_eq!(err, AuthzError::Forbidden);
    }
}
