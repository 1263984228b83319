//! Ambient-context authentication layer.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;

use super::extract::bearer_token;
use super::types::AuthenticatedPrincipal;

/// Authenticate the request once and stash the resolved user in request
/// extensions for downstream extractors.
///
/// Apply with `axum::middleware::from_fn_with_state` when the configured
/// token source is `context`.
pub async fn attach_principal(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers()).map(str::to_owned);

    match state.authenticator.authenticate(token.as_deref()).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthenticatedPrincipal(user));
            next.run(request).await
        }
        Err(failure) => failure.into_response(),
    }
}
