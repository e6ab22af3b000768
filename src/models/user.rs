use serde::{Deserialize, Serialize};

/// Row of the `User` table. Only the key is read by this service.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}
