//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod entitlement;

pub use entitlement::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
    WebhookPolicy,
};
