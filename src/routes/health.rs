use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{responses::JsonResponse, state::AppState};

pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.db.ping().await {
        Ok(()) => JsonResponse::success("ok").into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Health check could not reach the database");
            JsonResponse::unavailable("database unavailable").into_response()
        }
    }
}
