//! HTTP adapter for the payment webhook endpoint.

mod handlers;
mod routes;

pub use handlers::{
    handle_payment_webhook, health_check, WebhookApiError, WebhookAppState, EVENT_ID_HEADER,
    SIGNATURE_HEADER,
};
pub use routes::webhook_router;
