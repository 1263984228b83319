//! The single token-to-user resolution policy.

use std::sync::Arc;

use thiserror::Error;

use shared::models::User;

use super::directory::UserDirectory;
use super::jwt::{TokenValidation, TokenVerifier};

/// Why a bearer token failed to resolve to a user.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("no token found in request")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token has expired")]
    ExpiredToken,
    #[error("no email found in token")]
    MalformedClaims,
    #[error("user not found for email: {0}")]
    UserNotFound(String),
    #[error("user directory lookup failed")]
    Directory(#[source] anyhow::Error),
}

/// Resolves a raw bearer token to a stored `User`.
///
/// One shared policy for every call site. Stateless apart from shared
/// immutable collaborators, so a single instance serves arbitrarily many
/// concurrent requests.
pub struct TokenAuthenticator {
    verifier: Arc<TokenVerifier>,
    directory: Arc<dyn UserDirectory>,
    allow_expired_claim_extraction: bool,
}

impl TokenAuthenticator {
    pub fn new(
        verifier: Arc<TokenVerifier>,
        directory: Arc<dyn UserDirectory>,
        allow_expired_claim_extraction: bool,
    ) -> Self {
        Self {
            verifier,
            directory,
            allow_expired_claim_extraction,
        }
    }

    /// Resolve `raw_token` to the user it was issued for.
    ///
    /// An expired token is rejected outright unless
    /// `allow_expired_claim_extraction` was set, in which case the claims
    /// of the still-authentic token identify the user. The flag is the only
    /// behavioral difference between the two modes.
    pub async fn authenticate(&self, raw_token: Option<&str>) -> Result<User, AuthFailure> {
        let token = match raw_token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthFailure::MissingToken),
        };

        match self.verifier.validate(token) {
            TokenValidation::Valid => {}
            TokenValidation::Expired if self.allow_expired_claim_extraction => {
                tracing::debug!("tolerating expired token for claim extraction");
            }
            TokenValidation::Expired => return Err(AuthFailure::ExpiredToken),
            TokenValidation::Invalid(reason) => return Err(AuthFailure::InvalidToken(reason)),
        }

        let email = self
            .verifier
            .extract_email(token)
            .map_err(|_| AuthFailure::MalformedClaims)?;
        if email.is_empty() {
            return Err(AuthFailure::MalformedClaims);
        }

        let user = self
            .directory
            .find_by_email(&email)
            .await
            .map_err(AuthFailure::Directory)?
            .ok_or_else(|| AuthFailure::UserNotFound(email))?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::types::Claims;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::collections::HashMap;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-key-for-testing-only";

    struct MemoryDirectory {
        users: HashMap<String, User>,
    }

    impl MemoryDirectory {
        fn with_user(user: User) -> Self {
            let mut users = HashMap::new();
            users.insert(user.email.clone(), user);
            Self { users }
        }

        fn empty() -> Self {
            Self {
                users: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl UserDirectory for MemoryDirectory {
        async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            Ok(self.users.get(email).cloned())
        }
    }

    /// Directory that must never be reached.
    struct UnreachableDirectory;

    #[async_trait]
    impl UserDirectory for UnreachableDirectory {
        async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
            panic!("directory consulted before the token was validated");
        }
    }

    /// Directory whose backing store is down.
    struct FailingDirectory;

    #[async_trait]
    impl UserDirectory for FailingDirectory {
        async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    fn test_user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: Some("Test User".to_string()),
            oauth_id: "109876543210".to_string(),
            provider: "google".to_string(),
            email_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn verifier() -> Arc<TokenVerifier> {
        Arc::new(TokenVerifier::new(SECRET, 7))
    }

    fn authenticator(
        directory: impl UserDirectory + 'static,
        allow_expired: bool,
    ) -> TokenAuthenticator {
        TokenAuthenticator::new(verifier(), Arc::new(directory), allow_expired)
    }

    fn expired_token(email: &str) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
            extra: serde_json::Map::new(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_token_rejected_before_any_lookup() {
        let auth = authenticator(UnreachableDirectory, false);

        assert!(matches!(
            auth.authenticate(None).await,
            Err(AuthFailure::MissingToken)
        ));
        assert!(matches!(
            auth.authenticate(Some("")).await,
            Err(AuthFailure::MissingToken)
        ));
    }

    #[tokio::test]
    async fn garbage_token_rejected() {
        let auth = authenticator(UnreachableDirectory, false);

        assert!(matches!(
            auth.authenticate(Some("not-a-jwt")).await,
            Err(AuthFailure::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn forged_signature_rejected() {
        let auth = authenticator(UnreachableDirectory, false);
        let forged = TokenVerifier::new("wrong-secret", 7)
            .sign("u@site.com", None)
            .unwrap();

        match auth.authenticate(Some(&forged)).await {
            Err(AuthFailure::InvalidToken(reason)) => assert_eq!(reason, "signature"),
            other => panic!("expected a signature failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn expired_token_rejected_by_default() {
        let auth = authenticator(UnreachableDirectory, false);
        let token = expired_token("u@site.com");

        assert!(matches!(
            auth.authenticate(Some(&token)).await,
            Err(AuthFailure::ExpiredToken)
        ));
    }

    #[tokio::test]
    async fn expired_token_resolves_user_when_tolerated() {
        let user = test_user("u@site.com");
        let auth = authenticator(MemoryDirectory::with_user(user.clone()), true);
        let token = expired_token("u@site.com");

        let resolved = auth.authenticate(Some(&token)).await.unwrap();
        assert_eq!(resolved, user);
    }

    #[tokio::test]
    async fn valid_token_resolves_user() {
        let user = test_user("u@site.com");
        let auth = authenticator(MemoryDirectory::with_user(user.clone()), false);
        let token = verifier().sign("u@site.com", None).unwrap();

        let resolved = auth.authenticate(Some(&token)).await.unwrap();
        assert_eq!(resolved, user);
    }

    #[tokio::test]
    async fn unknown_email_never_fabricates_a_user() {
        let auth = authenticator(MemoryDirectory::empty(), false);
        let token = verifier().sign("ghost@site.com", None).unwrap();

        match auth.authenticate(Some(&token)).await {
            Err(AuthFailure::UserNotFound(email)) => assert_eq!(email, "ghost@site.com"),
            other => panic!("expected user-not-found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_email_claim_rejected() {
        let auth = authenticator(UnreachableDirectory, false);
        let token = verifier().sign("", None).unwrap();

        assert!(matches!(
            auth.authenticate(Some(&token)).await,
            Err(AuthFailure::MalformedClaims)
        ));
    }

    #[tokio::test]
    async fn token_without_email_claim_rejected() {
        #[derive(serde::Serialize)]
        struct BareClaims {
            iat: i64,
            exp: i64,
        }

        let now = Utc::now();
        let claims = BareClaims {
            iat: now.timestamp(),
            exp: (now + Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let auth = authenticator(UnreachableDirectory, false);
        assert!(matches!(
            auth.authenticate(Some(&token)).await,
            Err(AuthFailure::MalformedClaims)
        ));
    }

    #[tokio::test]
    async fn directory_failure_propagates_as_server_error() {
        let auth = authenticator(FailingDirectory, false);
        let token = verifier().sign("u@site.com", None).unwrap();

        assert!(matches!(
            auth.authenticate(Some(&token)).await,
            Err(AuthFailure::Directory(_))
        ));
    }
}
