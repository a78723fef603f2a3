//! Payment webhook service entrypoint.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing_subscriber::EnvFilter;

use payment_webhook::adapters::http::{webhook_router, WebhookAppState};
use payment_webhook::adapters::PostgresEntitlementStore;
use payment_webhook::config::{AppConfig, DatabaseConfig};
use payment_webhook::domain::entitlement::WebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    init_tracing(&config);

    config.validate()?;

    let pool = connect_pool(&config.database)?;
    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let store = Arc::new(PostgresEntitlementStore::new(
        pool,
        config.database.statement_timeout(),
    ));
    let verifier = Arc::new(WebhookVerifier::new(
        config.payment.razorpay_webhook_secret.clone(),
    ));
    let state = WebhookAppState::new(verifier, store, config.payment.webhook_policy());
    let app = webhook_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Payment webhook service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Payment webhook service stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Builds the pool without connecting, so the service comes up (and answers
/// 500 to the processor) while the database is unreachable.
fn connect_pool(database: &DatabaseConfig) -> Result<sqlx::PgPool, sqlx::Error> {
    let mut options: PgConnectOptions = database.url.parse()?;
    if let Some(password) = &database.password {
        options = options.password(password.expose_secret());
    }

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(Some(database.idle_timeout()))
        .max_lifetime(Some(database.max_lifetime()))
        .connect_lazy_with(options);

    Ok(pool)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
