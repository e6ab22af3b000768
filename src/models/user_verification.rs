use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One attempt to verify a user's email address.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserVerification {
    pub username_fk: String,
    pub token: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub email_sent_time: OffsetDateTime,
}
