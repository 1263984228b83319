//! Verification of Google-issued OAuth2 access tokens.

use serde::Deserialize;

use crate::error::ApiError;

const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

pub const GOOGLE_PROVIDER: &str = "google";

/// Profile fields returned by Google's userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Google's subject identifier for the account.
    pub id: String,
    pub email: String,
    pub verified_email: Option<bool>,
    pub name: Option<String>,
}

/// Thin client for the provider side of the login exchange.
///
/// A token counts as verified when Google accepts it on the userinfo
/// endpoint and returns the profile it was issued for.
#[derive(Clone, Default)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
}

impl GoogleOAuthClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub async fn fetch_user(&self, access_token: &str) -> Result<GoogleUserInfo, ApiError> {
        let response = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Google rejected the provider token: {}", status);
            return Err(ApiError::AuthenticationFailed(format!(
                "the provider rejected the token ({status})"
            )));
        }

        let info: GoogleUserInfo = response.json().await.map_err(|e| {
            ApiError::Internal(anyhow::anyhow!("invalid userinfo response: {}", e))
        })?;

        Ok(info)
    }
}
