use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use cookwise_core::domain::authentication::value_objects::Identity;
use uuid::Uuid;

use super::http::server::api_entities::api_error::ApiError;

/// Set by the upstream auth gateway once the user is authenticated.
pub const USER_ID_HEADER: &str = "x-user-id";

pub fn identity_from_headers(headers: &HeaderMap) -> Result<Identity, ApiError> {
    let value = headers.get(USER_ID_HEADER).ok_or_else(|| {
        ApiError::Unauthorized(format!("Authentication required: missing {USER_ID_HEADER} header"))
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .map(Identity::User)
        .ok_or_else(|| ApiError::Unauthorized(format!("Invalid {USER_ID_HEADER} header")))
}

pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>().copied() {
            return Ok(RequiredIdentity(identity));
        }

        let identity = identity_from_headers(&parts.headers)?;
        parts.extensions.insert(identity);

        Ok(RequiredIdentity(identity))
    }
}
