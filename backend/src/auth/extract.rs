//! Obtaining the bearer token and the authenticated user from a request.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use shared::models::User;

use crate::error::ApiError;
use crate::AppState;

use super::types::AuthenticatedPrincipal;

/// Pull the bearer token out of the `Authorization` header.
///
/// Returns `None` when the header is missing or does not carry the
/// `Bearer ` prefix. Pure; the same headers always yield the same result.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extractor giving handlers the authenticated user.
///
/// Prefers a principal already attached by `attach_principal`; without one
/// it parses the `Authorization` header itself, so handlers see the same
/// pipeline regardless of the configured token source.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<AuthenticatedPrincipal>() {
            return Ok(CurrentUser(principal.0.clone()));
        }

        let token = bearer_token(&parts.headers);
        let user = state.authenticator.authenticate(token).await?;

        Ok(CurrentUser(user))
    }
}
