//! Webhook error types for payment webhook handling.
//!
//! Defines all error conditions that can occur during webhook processing,
//! with HTTP status code mapping and retryability semantics.

use axum::http::StatusCode;
use thiserror::Error;

use super::payment_event::ParseError;
use crate::ports::StoreError;

/// Errors that occur during webhook processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Signature header missing or does not match the body.
    #[error("Invalid signature")]
    AuthenticationFailure,

    /// Body is not a well-formed payment notification.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Payment notes carry no user identifier.
    #[error("User not found")]
    MissingUserIdentifier,

    /// Entitlement store is temporarily unreachable.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Entitlement store refused the write.
    #[error("Store rejected write: {0}")]
    StoreRejected(String),
}

impl WebhookError {
    /// Returns true if the processor should retry delivering this webhook.
    ///
    /// Misclassifying a retryable error as terminal loses the entitlement for
    /// good, so only the transient store failure qualifies.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::StoreUnavailable(_))
    }

    /// Maps the error to an appropriate HTTP status code.
    ///
    /// Status codes determine the processor's retry behavior:
    /// - 2xx: Event acknowledged, no retry
    /// - 4xx: Client error, no retry
    /// - 5xx: Server error, will retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::AuthenticationFailure => StatusCode::UNAUTHORIZED,

            WebhookError::MalformedPayload(_)
            | WebhookError::MissingUserIdentifier
            | WebhookError::StoreRejected(_) => StatusCode::BAD_REQUEST,

            WebhookError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short diagnostic text returned to the processor.
    ///
    /// Store details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            WebhookError::AuthenticationFailure => "Invalid signature",
            WebhookError::MalformedPayload(_) => "Malformed payload",
            WebhookError::MissingUserIdentifier => "User not found",
            WebhookError::StoreUnavailable(_) => "Temporarily unavailable",
            WebhookError::StoreRejected(_) => "Rejected",
        }
    }
}

impl From<ParseError> for WebhookError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MalformedPayload(reason) => WebhookError::MalformedPayload(reason),
            ParseError::MissingUserIdentifier => WebhookError::MissingUserIdentifier,
        }
    }
}

impl From<StoreError> for WebhookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => WebhookError::StoreUnavailable(reason),
            StoreError::Rejected(reason) => WebhookError::StoreRejected(reason),
        }
    }
}
