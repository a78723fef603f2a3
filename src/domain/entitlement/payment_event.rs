//! Payment events parsed from Razorpay webhook payloads.
//!
//! The payload is untrusted JSON. Only the fields this service acts on are
//! extracted; everything else the processor sends is ignored.
//!
//! ```text
//! {
//!   "event": "payment.captured",
//!   "payload": {
//!     "payment": {
//!       "entity": {
//!         "id": "pay_29QQoUBi66xm2f",
//!         "amount": 19900,
//!         "currency": "INR",
//!         "notes": { "user_id": "..." }
//!       }
//!     }
//!   }
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Errors produced while extracting a [`PaymentEvent`] from a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Body is not JSON, or a field has the wrong shape.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// `payload.payment.entity.notes.user_id` is absent, null, or empty.
    #[error("Missing user identifier")]
    MissingUserIdentifier,
}

/// Webhook event types this service distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentEventType {
    /// `payment.captured`
    PaymentCaptured,
    /// `order.paid`
    OrderPaid,
    /// `payment.failed`
    PaymentFailed,
    /// Any other event name, or `None` when the payload carries no `event` field.
    Unknown(Option<String>),
}

impl PaymentEventType {
    /// Classifies a Razorpay event name.
    pub fn from_event_name(name: Option<&str>) -> Self {
        match name {
            Some("payment.captured") => PaymentEventType::PaymentCaptured,
            Some("order.paid") => PaymentEventType::OrderPaid,
            Some("payment.failed") => PaymentEventType::PaymentFailed,
            other => PaymentEventType::Unknown(other.map(str::to_string)),
        }
    }

    /// True for events that confirm money was collected.
    pub fn is_successful_payment(&self) -> bool {
        matches!(
            self,
            PaymentEventType::PaymentCaptured | PaymentEventType::OrderPaid
        )
    }

    /// True when the payload carried no event name at all.
    pub fn is_untyped(&self) -> bool {
        matches!(self, PaymentEventType::Unknown(None))
    }

    /// Event name for logging.
    pub fn as_str(&self) -> &str {
        match self {
            PaymentEventType::PaymentCaptured => "payment.captured",
            PaymentEventType::OrderPaid => "order.paid",
            PaymentEventType::PaymentFailed => "payment.failed",
            PaymentEventType::Unknown(Some(name)) => name.as_str(),
            PaymentEventType::Unknown(None) => "<untyped>",
        }
    }
}

/// A payment notification, trusted only after its signature was verified.
///
/// `amount` (minor units) and `currency` are informational and never decide
/// entitlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEvent {
    pub event_type: PaymentEventType,
    pub user_id: UserId,
    pub payment_id: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
}

/// Parses the raw webhook body into a [`PaymentEvent`].
///
/// # Errors
///
/// - `MalformedPayload` - body is not a JSON object, or `event` / `user_id`
///   has a non-string value
/// - `MissingUserIdentifier` - no usable `notes.user_id`
pub fn parse_payment_event(payload: &[u8]) -> Result<PaymentEvent, ParseError> {
    let root: Value = serde_json::from_slice(payload)
        .map_err(|e| ParseError::MalformedPayload(e.to_string()))?;

    if !root.is_object() {
        return Err(ParseError::MalformedPayload(
            "expected a JSON object".to_string(),
        ));
    }

    let event_name = match root.get("event") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.as_str()),
        Some(_) => {
            return Err(ParseError::MalformedPayload(
                "event must be a string".to_string(),
            ))
        }
    };
    let event_type = PaymentEventType::from_event_name(event_name);

    let entity = root.pointer("/payload/payment/entity");

    let user_id = match entity.and_then(|e| e.pointer("/notes/user_id")) {
        None | Some(Value::Null) => return Err(ParseError::MissingUserIdentifier),
        Some(Value::String(id)) => {
            UserId::new(id.as_str()).map_err(|_| ParseError::MissingUserIdentifier)?
        }
        Some(_) => {
            return Err(ParseError::MalformedPayload(
                "notes.user_id must be a string".to_string(),
            ))
        }
    };

    let payment_id = entity
        .and_then(|e| e.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let amount = entity.and_then(|e| e.get("amount")).and_then(Value::as_i64);
    let currency = entity
        .and_then(|e| e.get("currency"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(PaymentEvent {
        event_type,
        user_id,
        payment_id,
        amount,
        currency,
    })
}
