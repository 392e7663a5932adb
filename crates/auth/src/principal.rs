use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use innkeep_core::UserId;

use crate::Role;

/// Identity resolved by the backend from a bearer token.
///
/// Transient: scoped to one request and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            created_at: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Backend record associating a verified identity with its role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub role: Role,
}

impl Profile {
    /// Backend table holding profile rows.
    pub const TABLE: &'static str = "profiles";
}
