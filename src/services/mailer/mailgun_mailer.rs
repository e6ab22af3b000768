use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{
    template::{render_verification_email, verification_link},
    MailError, Mailer, SENDER_EMAIL, VERIFICATION_SUBJECT,
};
use crate::config::{Config, MailgunConfig};

#[derive(Clone)]
pub struct MailgunMailer {
    mailgun: MailgunConfig,
    verify_url: String,
    http: Client,
}

#[derive(Deserialize)]
struct MailgunResponse {
    id: Option<String>,
}

impl MailgunMailer {
    pub fn new(config: &Config, http: &Client) -> Self {
        Self {
            mailgun: config.mailgun.clone(),
            verify_url: config.verify_url.clone(),
            http: http.clone(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v3/{}/messages", self.mailgun.api_base, self.mailgun.domain)
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        if to.trim().is_empty() {
            return Err(MailError::InvalidEmailAddress("empty recipient".into()));
        }

        let form = [
            ("from", SENDER_EMAIL),
            ("to", to),
            ("subject", subject),
            ("html", html),
        ];

        let resp = self
            .http
            .post(self.messages_url())
            .basic_auth("api", Some(&self.mailgun.api_key))
            .form(&form)
            .send()
            .await?;

        if resp.status().is_success() {
            // Mailgun answers with a queued message id; keep it for correlation only.
            let mailgun_id = resp
                .json::<MailgunResponse>()
                .await
                .ok()
                .and_then(|b| b.id)
                .unwrap_or_default();
            tracing::debug!(mailgun_id = %mailgun_id, "Mailgun accepted message");
            return Ok(());
        }

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        Err(MailError::SendError(format!(
            "Mailgun send failed: {} {}",
            status, text
        )))
    }
}

#[async_trait]
impl Mailer for MailgunMailer {
    async fn send_verification_email(&self, to: &str, token: &str) -> Result<(), MailError> {
        let link = verification_link(&self.verify_url, token);
        let html = render_verification_email(&link);

        self.send(to, VERIFICATION_SUBJECT, &html).await
    }
}
