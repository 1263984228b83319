//! JWT signing and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};

use super::types::Claims;

/// Outcome of validating a token. Produced per call, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    Valid,
    Expired,
    Invalid(String),
}

/// Signs and validates the internally issued JWTs.
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_days: i64,
}

impl TokenVerifier {
    pub fn new(secret: &str, token_ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_days,
        }
    }

    /// Issue a signed token bound to `email`, with optional extra claims.
    pub fn sign(
        &self,
        email: &str,
        extra_claims: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + Duration::days(self.token_ttl_days);

        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            extra: extra_claims.unwrap_or_default(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate(&self, token: &str) -> TokenValidation {
        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(_) => TokenValidation::Valid,
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => TokenValidation::Expired,
                ErrorKind::InvalidSignature => TokenValidation::Invalid("signature".to_string()),
                ErrorKind::InvalidToken => TokenValidation::Invalid("malformed".to_string()),
                _ => TokenValidation::Invalid(e.to_string()),
            },
        }
    }

    /// Read the email claim of an authentic token.
    ///
    /// Expiry is deliberately not checked here; `validate` owns that
    /// decision, so callers can separate "who is this" from "is this still
    /// usable".
    pub fn extract_email(&self, token: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims.sub)
    }
}
