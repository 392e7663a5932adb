//! Bearer token extraction from an `Authorization` header value.

use crate::AuthzError;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// The literal `"Bearer "` prefix is required; a header without it is
/// rejected rather than passed through as a token.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthzError> {
    let header = header.ok_or_else(|| AuthzError::unauthorized("missing authorization header"))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AuthzError::unauthorized("authorization header is not a bearer token"))?
        .trim();

    if token.is_empty() {
        return Err(AuthzError::unauthorized("empty bearer token"));
    }

    Ok(token)
}
