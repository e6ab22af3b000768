use std::sync::Arc;

use anyhow::Context;
use reqwest::Client;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::net::TcpListener;
use tracing::{error, info, Instrument};

use verify_email_pubsub::{
    config::{Config, DatabaseConfig},
    db::{postgres_user_repository::PostgresUserRepository, user_repository::UserRepository},
    routes,
    services::mailer::{Mailer, MailgunMailer},
    telemetry, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    run().instrument(telemetry::service_span()).await
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    let pg_pool = establish_connection(&config.database);
    let user_repo = Arc::new(PostgresUserRepository { pool: pg_pool }) as Arc<dyn UserRepository>;

    // A failed check is logged and tolerated; the pool reconnects lazily per request.
    match user_repo.ping().await {
        Ok(()) => info!("Connection has been established successfully."),
        Err(err) => error!(error = %err, "Unable to connect to the database"),
    }

    let http_client = Client::new();
    let mailer = Arc::new(MailgunMailer::new(&config, &http_client)) as Arc<dyn Mailer>;

    let bind_addr = config.bind_addr;
    let state = AppState {
        db: user_repo,
        mailer,
        config: Arc::new(config),
    };

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!(addr = %bind_addr, "Listening for verification messages");

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shut down cleanly");
    Ok(())
}

/// Builds a lazy pool so a database that is still starting doesn't keep the service down.
fn establish_connection(database: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(database.connect_options())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
