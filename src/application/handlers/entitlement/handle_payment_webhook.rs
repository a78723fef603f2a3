//! HandlePaymentWebhookHandler - Command handler for processing payment processor webhooks.
//!
//! Each delivery moves through a fixed sequence and stops at the first
//! terminal state:
//!
//! 1. Authenticate the raw body against the signature header (401 on failure)
//! 2. Parse the payment event (400 on failure)
//! 3. Filter out events that do not grant entitlement (200, no write)
//! 4. Upsert the entitlement (500 if retryable, 400 if rejected)
//! 5. Acknowledge (200)
//!
//! Step 4 is the only side effect and it is idempotent, so the processor may
//! retry any non-2xx response safely.

use std::sync::Arc;

use crate::domain::entitlement::{
    parse_payment_event, PaymentEventType, Provider, WebhookError, WebhookRequest,
    WebhookVerifier,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::EntitlementStore;

/// Command to handle a payment webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// The delivery exactly as received.
    pub request: WebhookRequest,
    /// Recorded as the entitlement's `updated_at`.
    pub received_at: Timestamp,
}

impl HandlePaymentWebhookCommand {
    pub fn new(request: WebhookRequest) -> Self {
        Self {
            request,
            received_at: Timestamp::now(),
        }
    }
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Entitlement granted (or re-granted) for the user.
    Acknowledged {
        user_id: UserId,
        payment_id: Option<String>,
    },
    /// Event acknowledged without touching entitlement state.
    Ignored { event_type: String },
}

/// Which event types grant entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookPolicy {
    /// Treat payloads with no `event` field as successful payments.
    pub accept_untyped_events: bool,
}

impl WebhookPolicy {
    pub fn grants_entitlement(&self, event_type: &PaymentEventType) -> bool {
        event_type.is_successful_payment() || (self.accept_untyped_events && event_type.is_untyped())
    }
}

impl Default for WebhookPolicy {
    fn default() -> Self {
        Self {
            accept_untyped_events: true,
        }
    }
}

/// Handler for processing payment processor webhooks.
///
/// Holds no per-request state; one instance serves all concurrent deliveries.
pub struct HandlePaymentWebhookHandler {
    verifier: Arc<WebhookVerifier>,
    store: Arc<dyn EntitlementStore>,
    policy: WebhookPolicy,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        verifier: Arc<WebhookVerifier>,
        store: Arc<dyn EntitlementStore>,
        policy: WebhookPolicy,
    ) -> Self {
        Self {
            verifier,
            store,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        let HandlePaymentWebhookCommand {
            request,
            received_at,
        } = cmd;
        let event_id = request.event_id.as_deref();

        // 1. Authenticate
        if !self
            .verifier
            .verify(&request.body, request.signature.as_deref())
        {
            tracing::warn!(
                outcome = "rejected",
                event_id,
                signature_present = request.signature.is_some(),
                "Webhook signature verification failed"
            );
            return Err(WebhookError::AuthenticationFailure);
        }

        // 2. Parse
        let event = match parse_payment_event(&request.body) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(outcome = "rejected", event_id, error = %e, "Unusable webhook payload");
                return Err(e.into());
            }
        };

        // 3. Filter
        if !self.policy.grants_entitlement(&event.event_type) {
            tracing::info!(
                outcome = "ignored",
                event_id,
                event_type = event.event_type.as_str(),
                user_id = %event.user_id,
                payment_id = event.payment_id.as_deref(),
                "Webhook event does not grant entitlement"
            );
            return Ok(HandlePaymentWebhookResult::Ignored {
                event_type: event.event_type.as_str().to_string(),
            });
        }

        // 4. Persist on its own task so a dropped connection cannot abort the write
        let store = Arc::clone(&self.store);
        let user_id = event.user_id.clone();
        let write = tokio::spawn(async move {
            store
                .upsert(&user_id, true, Provider::Razorpay, received_at)
                .await
        });

        let written = match write.await {
            Ok(result) => result.map_err(WebhookError::from),
            Err(e) => Err(WebhookError::StoreUnavailable(format!(
                "upsert task failed: {}",
                e
            ))),
        };

        if let Err(err) = written {
            tracing::error!(
                outcome = "failed",
                event_id,
                event_type = event.event_type.as_str(),
                user_id = %event.user_id,
                payment_id = event.payment_id.as_deref(),
                retryable = err.is_retryable(),
                error = %err,
                "Failed to record entitlement"
            );
            return Err(err);
        }

        // 5. Acknowledge
        tracing::info!(
            outcome = "acknowledged",
            event_id,
            event_type = event.event_type.as_str(),
            user_id = %event.user_id,
            payment_id = event.payment_id.as_deref(),
            amount = event.amount,
            currency = event.currency.as_deref(),
            "Entitlement granted"
        );

        Ok(HandlePaymentWebhookResult::Acknowledged {
            user_id: event.user_id,
            payment_id: event.payment_id,
        })
    }
}
