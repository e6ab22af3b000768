use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    db::user_repository::UserRepository,
    models::{user::User, user_verification::UserVerification},
};

pub struct PostgresUserRepository {
    pub pool: PgPool,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(r#"SELECT username FROM "User" WHERE username = $1 LIMIT 1"#)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_verification_request(
        &self,
        username: &str,
    ) -> Result<UserVerification, sqlx::Error> {
        // v4 UUIDs come from the OS CSPRNG, so tokens are neither sequential nor guessable.
        let token = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();

        sqlx::query_as::<_, UserVerification>(
            r#"
            INSERT INTO "UserVerification" (username_fk, token, email_sent_time)
            VALUES ($1, $2, $3)
            RETURNING username_fk, token, email_sent_time
            "#,
        )
        .bind(username)
        .bind(token)
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
    }
}
