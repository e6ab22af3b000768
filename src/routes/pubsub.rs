use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    responses::JsonResponse,
    state::AppState,
    trigger::{handle_message, PushBody},
};

/// Acks every decodable message, whatever happened downstream; the transport must not redeliver
/// a message whose failure was already logged.
pub async fn handle_pubsub_push(
    State(state): State<AppState>,
    Json(body): Json<PushBody>,
) -> Response {
    let envelope = body.into_envelope();
    match handle_message(&state, &envelope.message).await {
        Ok(outcome) => {
            tracing::debug!(
                ?outcome,
                subscription = envelope.subscription.as_deref(),
                "Message handled"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                message_id = envelope.message.message_id.as_deref(),
                "Rejecting malformed message"
            );
            JsonResponse::bad_request_with_code(&err.to_string(), err.code()).into_response()
        }
    }
}
