use diesel::prelude::*;
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection, RunQueryDsl,
};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConn = diesel_async::pooled_connection::deadpool::Object<AsyncPgConnection>;

pub fn establish_connection_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = Pool::builder(config).build()?;

    Ok(pool)
}

pub async fn get_conn(pool: &DbPool) -> anyhow::Result<DbConn> {
    pool.get()
        .await
        .map_err(|e| anyhow::anyhow!("failed to check out a database connection: {e}"))
}

// User database operations
pub mod users {
    use super::*;
    use crate::models::UserRow;
    use chrono::Utc;
    use uuid::Uuid;

    pub async fn get_by_email(
        conn: &mut AsyncPgConnection,
        email_val: &str,
    ) -> anyhow::Result<Option<UserRow>> {
        use crate::schema::users::dsl::*;

        let user = users
            .filter(email.eq(email_val))
            .first::<UserRow>(conn)
            .await
            .optional()?;

        Ok(user)
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        email_val: &str,
        name_val: Option<&str>,
        oauth_id_val: &str,
        provider_val: &str,
        email_verified_val: bool,
    ) -> anyhow::Result<UserRow> {
        use crate::schema::users::dsl::*;

        let new_user = diesel::insert_into(users)
            .values((
                email.eq(email_val),
                name.eq(name_val),
                oauth_id.eq(oauth_id_val),
                provider.eq(provider_val),
                email_verified.eq(email_verified_val),
            ))
            .get_result::<UserRow>(conn)
            .await?;

        Ok(new_user)
    }

    /// Refresh the profile fields reported by the provider on a re-login.
    pub async fn update_profile(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        name_val: Option<&str>,
        email_verified_val: bool,
    ) -> anyhow::Result<UserRow> {
        use crate::schema::users::dsl::*;

        let updated = diesel::update(users.filter(id.eq(user_id)))
            .set((
                name.eq(name_val),
                email_verified.eq(email_verified_val),
                updated_at.eq(Utc::now()),
            ))
            .get_result::<UserRow>(conn)
            .await?;

        Ok(updated)
    }
}
