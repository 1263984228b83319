//! Auth-related types.

use serde::{Deserialize, Serialize};
use shared::models::User;

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    #[serde(default)]
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Any additional claims embedded at signing time.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The resolved user attached to the current request's extensions for the
/// duration of handling.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub User);
