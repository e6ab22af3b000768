pub mod health;
pub mod pubsub;

use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{state::AppState, telemetry};

pub fn router(state: AppState) -> Router {
    Router::new()
        // Pub/Sub push subscriptions and the functions runtime both deliver to "/"
        .route("/", post(pubsub::handle_pubsub_push))
        .route("/pubsub", post(pubsub::handle_pubsub_push))
        .route("/healthz", get(health::healthz))
        .with_state(state)
        // Connection tasks don't inherit the startup span, so each request opens its own.
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            telemetry::request_span(req.method().as_str(), req.uri().path())
        }))
}
