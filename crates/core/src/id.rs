//! Strongly-typed identifiers.
//!
//! The backend issues UUID primary keys; these newtypes keep room ids and
//! user ids from being swapped by accident.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a room row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(Uuid);

/// Identifier of an authenticated user (and of the matching profile row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

/// Row-key plumbing shared by every id: random construction for fixtures,
/// text form identical to the backend's uuid column, and parsing that names
/// the id kind on failure.
macro_rules! uuid_key {
    ($t:ty, $kind:literal) => {
        impl $t {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::from_str(s.trim())
                    .map(Self)
                    .map_err(|e| DomainError::invalid_id(format!("{} {s:?}: {e}", $kind)))
            }
        }
    };
}

uuid_key!(RoomId, "room id");
uuid_key!(UserId, "user id");
