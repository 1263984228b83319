use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identity record, keyed by email.
///
/// Accounts are created on first OAuth login and only ever read by email
/// afterwards; there is no self-service registration path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Display name reported by the OAuth provider, if any.
    pub name: Option<String>,
    /// Subject identifier assigned by the OAuth provider.
    pub oauth_id: String,
    pub provider: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
