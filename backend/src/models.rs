// Database models for Diesel
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Database representation of a user account.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub oauth_id: String,
    pub provider: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for shared::models::User {
    fn from(row: UserRow) -> Self {
        shared::models::User {
            id: row.id,
            email: row.email,
            name: row.name,
            oauth_id: row.oauth_id,
            provider: row.provider,
            email_verified: row.email_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
