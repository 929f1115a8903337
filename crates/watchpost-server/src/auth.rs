//! `X-Auth-User` extractor: who is asking.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use watchpost_core::{AuthorizationModes, AuthorizationSubject};
use watchpost_graph::ObjectGraph;

use crate::error::ApiError;

/// Header naming the contact a request is made on behalf of.
pub const AUTH_USER_HEADER: &str = "x-auth-user";

/// The user named by the request, if any. No header means a trusted internal
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub Option<String>);

impl AuthUser {
  /// Build the authorization subject for this user against `graph`.
  pub fn subject<'g>(
    &self,
    graph: &'g ObjectGraph,
    modes: AuthorizationModes,
  ) -> AuthorizationSubject<'g> {
    AuthorizationSubject::resolve(self.0.as_deref(), modes, graph.contact_lookup())
  }
}

/// Read the auth user directly from headers.
pub fn auth_user(headers: &HeaderMap) -> Result<AuthUser, ApiError> {
  let Some(value) = headers.get(AUTH_USER_HEADER) else {
    return Ok(AuthUser(None));
  };
  let name = value
    .to_str()
    .map_err(|_| ApiError::BadRequest("X-Auth-User is not valid UTF-8".to_string()))?;
  Ok(AuthUser(Some(name.to_string())))
}

impl<S> FromRequestParts<S> for AuthUser
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    auth_user(&parts.headers)
  }
}
