use anyhow::{bail, Context, Result};
use std::env;

/// Where the authenticated-user extractor finds its bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// The extractor parses the `Authorization` header itself.
    Header,
    /// The `attach_principal` middleware authenticates once per request and
    /// the extractor reads the principal from request extensions.
    Context,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    /// When set, an expired (but authentic) token still resolves to its
    /// user instead of failing with `expired_token`. Off by default; flip
    /// only for flows that must identify the caller of a stale token.
    pub allow_expired_claim_extraction: bool,
    pub token_source: TokenSource,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET")
                .context("JWT_SECRET must be set")?,
            token_ttl_days: env::var("TOKEN_TTL_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("TOKEN_TTL_DAYS must be a valid number")?,
            allow_expired_claim_extraction: env::var("AUTH_ALLOW_EXPIRED_CLAIMS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            token_source: parse_token_source(
                &env::var("AUTH_TOKEN_SOURCE").unwrap_or_else(|_| "header".to_string()),
            )?,
        })
    }
}

fn parse_token_source(value: &str) -> Result<TokenSource> {
    match value.trim().to_lowercase().as_str() {
        "header" => Ok(TokenSource::Header),
        "context" => Ok(TokenSource::Context),
        other => bail!("AUTH_TOKEN_SOURCE must be 'header' or 'context', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_source_parses_both_modes() {
        assert_eq!(parse_token_source("header").unwrap(), TokenSource::Header);
        assert_eq!(parse_token_source("Context").unwrap(), TokenSource::Context);
        assert!(parse_token_source("cookie").is_err());
    }
}
