use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

// ============================================================================
// Auth API Types
// ============================================================================

/// Body of `POST /auth/google`: an OAuth2 access token obtained from Google
/// by the client.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1))]
    pub token: String,
}

/// Successful login response carrying the internally issued JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Body of `GET /auth/userinfo`.
///
/// `sub` is the provider's subject identifier, not the internal row id.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub sub: String,
    pub name: Option<String>,
    pub email: String,
    pub provider: String,
    pub email_verified: bool,
}

impl From<User> for UserInfoResponse {
    fn from(user: User) -> Self {
        UserInfoResponse {
            sub: user.oauth_id,
            name: user.name,
            email: user.email,
            provider: user.provider,
            email_verified: user.email_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn user_info_carries_the_provider_subject() {
        let user = User {
            id: Uuid::new_v4(),
            email: "u@site.com".to_string(),
            name: Some("U Ser".to_string()),
            oauth_id: "109876543210".to_string(),
            provider: "google".to_string(),
            email_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let info = UserInfoResponse::from(user);
        assert_eq!(info.sub, "109876543210");
        assert_eq!(info.email, "u@site.com");
        assert_eq!(info.name.as_deref(), Some("U Ser"));
        assert_eq!(info.provider, "google");
        assert!(info.email_verified);
    }

    #[test]
    fn empty_login_token_fails_validation() {
        use validator::Validate;

        assert!(GoogleLoginRequest {
            token: String::new()
        }
        .validate()
        .is_err());
        assert!(GoogleLoginRequest {
            token: "ya29.a0".to_string()
        }
        .validate()
        .is_ok());
    }
}
