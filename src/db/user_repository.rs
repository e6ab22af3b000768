use async_trait::async_trait;

use crate::models::{user::User, user_verification::UserVerification};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup on `User.username`; no case folding.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;

    /// Appends a `UserVerification` row with a fresh random token and the current time.
    async fn create_verification_request(
        &self,
        username: &str,
    ) -> Result<UserVerification, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;
}
