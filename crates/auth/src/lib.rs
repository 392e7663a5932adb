//! `innkeep-auth`: authentication/authorization vocabulary.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! verification and profile lookup are the backend's job, the guard that
//! sequences them lives in the API crate.

pub mod authorize;
pub mod bearer;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, AuthzError};
pub use bearer::{extract_bearer, BEARER_PREFIX};
pub use principal::{AuthenticatedUser, Profile};
pub use roles::{EmptyRoleSet, Role, RoleSet};
