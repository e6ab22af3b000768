use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Attached to every log line through the root span.
pub const SERVICE_NAME: &str = "send-email-service";

/// Installs the process-wide JSON subscriber. Call once, before anything logs.
pub fn init() -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_span_list(true)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Root span for startup and shutdown logging.
pub fn service_span() -> Span {
    tracing::info_span!("service", service = SERVICE_NAME)
}

/// Root span for one inbound request; everything the handler logs nests under it.
pub fn request_span(method: &str, path: &str) -> Span {
    tracing::info_span!("request", service = SERVICE_NAME, method = %method, path = %path)
}
