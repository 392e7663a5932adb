use innkeep_auth::AuthenticatedUser;
use innkeep_core::UserId;

/// Principal context for a request that passed the role guard.
///
/// Inserted into request extensions by [`crate::middleware::require_role_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    user: AuthenticatedUser,
}

impl PrincipalContext {
    pub fn new(user: AuthenticatedUser) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }
}
