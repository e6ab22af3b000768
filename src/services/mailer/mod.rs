use async_trait::async_trait;
use std::fmt;

mod mailgun_mailer;
#[cfg(test)]
mod mock_mailer;
pub mod template;

pub use mailgun_mailer::MailgunMailer;
#[cfg(test)]
pub use mock_mailer::MockMailer;

pub const SENDER_EMAIL: &str = "verify@megamindcorp.me";
pub const VERIFICATION_SUBJECT: &str = "Verify Your Email Address";

#[derive(Debug)]
#[allow(dead_code)]
pub enum MailError {
    Other(String),
    InvalidEmailAddress(String),
    SendError(String),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailError::Other(e) => write!(f, "Error: {}", e),
            MailError::InvalidEmailAddress(e) => write!(f, "Invalid Address: {}", e),
            MailError::SendError(e) => write!(f, "Send error: {}", e),
        }
    }
}

impl std::error::Error for MailError {}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        MailError::SendError(err.to_string())
    }
}

/// Sends the confirmation email. Callers own the failure policy; implementations never retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), MailError>;
}
