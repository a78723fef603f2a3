//! Entitlement domain module.
//!
//! Handles authentication and interpretation of payment processor webhooks,
//! and the entitlement state they grant.
//!
//! # Module Structure
//!
//! - `record` - EntitlementRecord and Provider
//! - `request` - WebhookRequest as received on the wire
//! - `webhook_verifier` - HMAC-SHA256 signature verification
//! - `payment_event` - Typed payment event parsed from the raw body
//! - `webhook_errors` - Error taxonomy with HTTP status mapping

mod payment_event;
mod record;
mod request;
mod webhook_errors;
mod webhook_verifier;

pub use payment_event::{parse_payment_event, ParseError, PaymentEvent, PaymentEventType};
pub use record::{EntitlementRecord, Provider};
pub use request::WebhookRequest;
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{sign_payload, verify_signature, WebhookVerifier};
