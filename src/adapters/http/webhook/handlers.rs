//! HTTP handlers for the payment webhook endpoint.
//!
//! These handlers connect Axum routes to the application layer command handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookPolicy,
};
use crate::domain::entitlement::{WebhookError, WebhookRequest, WebhookVerifier};
use crate::ports::EntitlementStore;

/// Header carrying the hex HMAC-SHA256 of the raw body.
pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// Header carrying the processor's unique delivery id.
pub const EVENT_ID_HEADER: &str = "x-razorpay-event-id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct WebhookAppState {
    pub verifier: Arc<WebhookVerifier>,
    pub entitlement_store: Arc<dyn EntitlementStore>,
    pub policy: WebhookPolicy,
}

impl WebhookAppState {
    pub fn new(
        verifier: Arc<WebhookVerifier>,
        entitlement_store: Arc<dyn EntitlementStore>,
        policy: WebhookPolicy,
    ) -> Self {
        Self {
            verifier,
            entitlement_store,
            policy,
        }
    }

    /// Create the webhook handler from the shared state.
    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.verifier.clone(),
            self.entitlement_store.clone(),
            self.policy,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /payment-webhook - Handle Razorpay webhook events
///
/// The body is taken as raw bytes; it is never deserialized before the
/// signature check.
pub async fn handle_payment_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let mut request = WebhookRequest::new(body.to_vec(), header_value(&headers, SIGNATURE_HEADER));
    if let Some(content_type) = header_value(&headers, header::CONTENT_TYPE.as_str()) {
        request = request.with_content_type(content_type);
    }
    if let Some(event_id) = header_value(&headers, EVENT_ID_HEADER) {
        request = request.with_event_id(event_id);
    }

    state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand::new(request))
        .await?;

    Ok((StatusCode::OK, "OK"))
}

/// GET /health - Liveness probe
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(pub WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        (self.0.status_code(), self.0.public_message()).into_response()
    }
}
