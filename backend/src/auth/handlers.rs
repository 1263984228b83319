//! Authentication HTTP handlers.

use axum::{extract::State, Json};
use validator::Validate;

use shared::api::{GoogleLoginRequest, TokenResponse, UserInfoResponse};

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::UserRow;
use crate::AppState;

use super::extract::CurrentUser;
use super::google::{GoogleUserInfo, GOOGLE_PROVIDER};

/// Exchange a Google OAuth2 access token for an internally issued JWT.
///
/// The provider token is verified against Google, the local account is
/// created or refreshed from the returned profile, and a JWT bound to the
/// account's email is returned.
pub async fn login_with_google(
    State(state): State<AppState>,
    Json(request): Json<GoogleLoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let info = state.oauth.fetch_user(&request.token).await?;
    tracing::info!("OAuth login attempt from: {}", info.email);

    let user = upsert_google_user(&state, &info).await?;

    let token = state
        .verifier
        .sign(&user.email, None)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to sign token: {}", e)))?;

    tracing::info!("Issued token for: {}", user.email);
    Ok(Json(TokenResponse { token }))
}

/// Create the account on first login, refresh provider-reported fields after.
async fn upsert_google_user(state: &AppState, info: &GoogleUserInfo) -> anyhow::Result<UserRow> {
    let mut conn = db::get_conn(&state.pool).await?;

    match db::users::get_by_email(&mut conn, &info.email).await? {
        Some(existing) => {
            db::users::update_profile(
                &mut conn,
                existing.id,
                info.name.as_deref(),
                info.verified_email.unwrap_or(false),
            )
            .await
        }
        None => {
            tracing::info!("Creating new user for: {}", info.email);
            db::users::create(
                &mut conn,
                &info.email,
                info.name.as_deref(),
                &info.id,
                GOOGLE_PROVIDER,
                info.verified_email.unwrap_or(false),
            )
            .await
        }
    }
}

/// Return the authenticated user's profile.
pub async fn user_info(CurrentUser(user): CurrentUser) -> Json<UserInfoResponse> {
    tracing::info!("Returning user info for: {}", user.email);
    Json(UserInfoResponse::from(user))
}
