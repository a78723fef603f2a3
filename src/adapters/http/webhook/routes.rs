//! Axum router configuration for the payment webhook service.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{handle_payment_webhook, health_check, WebhookAppState};

/// Create the webhook service router.
///
/// # Routes
/// - `POST /payment-webhook` - Handle Razorpay webhooks (no auth, signature verified)
/// - `GET /health` - Liveness probe
///
/// Requests exceeding `request_timeout` get 408; an in-flight entitlement write
/// still completes.
pub fn webhook_router(state: WebhookAppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/payment-webhook", post(handle_payment_webhook))
        .route("/health", get(health_check))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
