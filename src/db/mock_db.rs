use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

use super::user_repository::UserRepository;
use crate::models::{user::User, user_verification::UserVerification};

/// In-memory stand-in for the `User` / `UserVerification` tables.
#[derive(Default)]
pub struct MockDb {
    pub users: Vec<String>,
    pub verifications: Mutex<Vec<UserVerification>>,
    pub lookups: Mutex<Vec<String>>,
    pub fail_lookup: bool,
    pub fail_insert: bool,
    pub lookup_delay: Option<Duration>,
}

impl MockDb {
    pub fn with_users(users: &[&str]) -> Self {
        Self {
            users: users.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn verifications(&self) -> Vec<UserVerification> {
        self.verifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockDb {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        self.lookups.lock().unwrap().push(username.to_string());

        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_lookup {
            return Err(sqlx::Error::PoolTimedOut);
        }

        Ok(self
            .users
            .iter()
            .find(|u| u.as_str() == username)
            .map(|u| User {
                username: u.clone(),
            }))
    }

    async fn create_verification_request(
        &self,
        username: &str,
    ) -> Result<UserVerification, sqlx::Error> {
        if self.fail_insert {
            return Err(sqlx::Error::RowNotFound);
        }

        let entry = UserVerification {
            username_fk: username.to_string(),
            token: Uuid::new_v4(),
            email_sent_time: OffsetDateTime::now_utc(),
        };
        self.verifications.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.fail_lookup {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}
