use thiserror::Error;

use crate::{Profile, Role, RoleSet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// No usable credential, or the backend did not recognise it.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Identity is known but its profile does not grant an allowed role.
    #[error("forbidden")]
    Forbidden,
}

impl AuthzError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }
}

/// Decide whether a resolved profile may proceed.
///
/// - No IO
/// - No panics
/// - A missing profile is treated exactly like a role outside `allowed`
pub fn authorize(profile: Option<&Profile>, allowed: &RoleSet) -> Result<Role, AuthzError> {
    match profile {
        Some(p) if allowed.contains(p.role) => Ok(p.role),
        _ => Err(AuthzError::Forbidden),
    }
}
