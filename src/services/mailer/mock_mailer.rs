use async_trait::async_trait;
use std::sync::Mutex;

use super::{MailError, Mailer};

/// Records verification emails instead of sending them.
#[derive(Debug, Default)]
pub struct MockMailer {
    pub sent_verification_emails: Mutex<Vec<(String, String)>>,
    pub fail_send: bool,
}

impl MockMailer {
    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent_verification_emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), MailError> {
        self.sent_verification_emails
            .lock()
            .unwrap()
            .push((to.to_string(), token.to_string()));
        if self.fail_send {
            Err(MailError::Other("mock failure".into()))
        } else {
            Ok(())
        }
    }
}
