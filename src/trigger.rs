//! Per-message verification workflow: decode, look up, record, notify.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::state::AppState;

/// Pub/Sub push envelope. Binary-mode CloudEvents send this as the whole body.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEnvelope {
    pub message: PubsubMessage,
    #[serde(default)]
    pub subscription: Option<String>,
}

/// Accepted request bodies: a bare envelope, or a structured-mode CloudEvent
/// (`application/cloudevents+json`) carrying the envelope in `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PushBody {
    Envelope(PushEnvelope),
    CloudEvent {
        #[serde(default)]
        id: Option<String>,
        data: PushEnvelope,
    },
}

impl PushBody {
    pub fn into_envelope(self) -> PushEnvelope {
        match self {
            PushBody::Envelope(envelope) => envelope,
            PushBody::CloudEvent { id, mut data } => {
                if data.message.message_id.is_none() {
                    data.message.message_id = id;
                }
                data
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PubsubMessage {
    #[serde(default)]
    pub data: String,
    #[serde(default, rename = "messageId")]
    pub message_id: Option<String>,
    #[serde(default)]
    pub attributes: Option<HashMap<String, String>>,
}

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("message data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("message data is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("message does not name a user")]
    EmptyUsername,
}

impl TriggerError {
    pub fn code(&self) -> &'static str {
        match self {
            TriggerError::Base64(_) => "invalid_base64",
            TriggerError::Utf8(_) => "invalid_utf8",
            TriggerError::EmptyUsername => "empty_username",
        }
    }
}

/// How far a message got. Only decode failures are errors; everything else is logged and acked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    UserNotFound,
    LookupFailed,
    EntryFailed,
    EmailFailed { token: Uuid },
    EmailSent { token: Uuid },
}

/// base64 -> UTF-8 -> drop every `"`.
pub fn decode_username(data: &str) -> Result<String, TriggerError> {
    let bytes = STANDARD.decode(data.trim())?;
    let username = String::from_utf8(bytes)?.replace('"', "");

    if username.is_empty() {
        return Err(TriggerError::EmptyUsername);
    }
    Ok(username)
}

#[instrument(
    name = "verify_email_pubsub",
    skip_all,
    fields(
        api = "verifyEmailPubsub",
        message_id = message.message_id.as_deref(),
    )
)]
pub async fn handle_message(
    state: &AppState,
    message: &PubsubMessage,
) -> Result<Outcome, TriggerError> {
    let username = decode_username(&message.data)?;
    info!(username = %username, "Received message");

    let lookup = tokio::time::timeout(
        state.config.lookup_timeout,
        state.db.find_user_by_username(&username),
    )
    .await;

    match lookup {
        Ok(Ok(Some(user))) => {
            info!(username = %user.username, "User found");
        }
        Ok(Ok(None)) => {
            error!(username = %username, "User not found");
            return Ok(Outcome::UserNotFound);
        }
        Ok(Err(err)) => {
            error!(username = %username, error = %err, "User lookup failed");
            return Ok(Outcome::LookupFailed);
        }
        Err(_) => {
            error!(
                username = %username,
                timeout_ms = state.config.lookup_timeout.as_millis() as u64,
                "User lookup timed out"
            );
            return Ok(Outcome::LookupFailed);
        }
    }

    Ok(create_verification_entry(state, &username).await)
}

/// Inserts the verification row, then sends the email. A failed send keeps the row.
#[instrument(skip_all, fields(api = "createVerificationEntry"))]
pub async fn create_verification_entry(state: &AppState, username: &str) -> Outcome {
    let entry = match state.db.create_verification_request(username).await {
        Ok(entry) => entry,
        Err(err) => {
            error!(username = %username, error = %err, "Could not create verification entry");
            return Outcome::EntryFailed;
        }
    };

    info!(
        username_fk = %entry.username_fk,
        email_sent_time = %entry.email_sent_time,
        "Verification entry created successfully"
    );

    send_mail(state, username, entry.token).await
}

#[instrument(skip_all, fields(api = "sendMail"))]
async fn send_mail(state: &AppState, receiver: &str, token: Uuid) -> Outcome {
    match state
        .mailer
        .send_verification_email(receiver, &token.to_string())
        .await
    {
        Ok(()) => {
            info!("Email sent");
            Outcome::EmailSent { token }
        }
        Err(err) => {
            error!(error = %err, "Could not send email");
            Outcome::EmailFailed { token }
        }
    }
}
