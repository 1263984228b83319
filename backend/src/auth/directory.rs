//! User lookup seam between the authenticator and the user store.

use async_trait::async_trait;
use shared::models::User;

use crate::db::{self, DbPool};

/// Read-only lookup of users by email.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
}

/// Production directory backed by the `users` table.
pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let mut conn = db::get_conn(&self.pool).await?;
        let row = db::users::get_by_email(&mut conn, email).await?;

        Ok(row.map(Into::into))
    }
}
