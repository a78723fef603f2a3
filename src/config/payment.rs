//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::WebhookPolicy;

const MIN_WEBHOOK_SECRET_LEN: usize = 8;

/// Payment configuration (Razorpay webhooks)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay webhook secret, the HMAC key for `X-Razorpay-Signature`
    pub razorpay_webhook_secret: SecretString,

    /// Grant entitlement for payloads that carry no `event` field
    #[serde(default = "default_accept_untyped_events")]
    pub accept_untyped_events: bool,
}

impl PaymentConfig {
    /// Event handling policy derived from this configuration
    pub fn webhook_policy(&self) -> WebhookPolicy {
        WebhookPolicy {
            accept_untyped_events: self.accept_untyped_events,
        }
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.razorpay_webhook_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_WEBHOOK_SECRET"));
        }
        if secret.len() < MIN_WEBHOOK_SECRET_LEN {
            return Err(ValidationError::WebhookSecretTooShort);
        }
        Ok(())
    }
}

fn default_accept_untyped_events() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> PaymentConfig {
        PaymentConfig {
            razorpay_webhook_secret: SecretString::new(secret.to_string()),
            accept_untyped_events: true,
        }
    }

    #[test]
    fn test_validation_missing_webhook_secret() {
        assert_eq!(
            config("").validate(),
            Err(ValidationError::MissingRequired("RAZORPAY_WEBHOOK_SECRET"))
        );
    }

    #[test]
    fn test_validation_short_webhook_secret() {
        assert_eq!(
            config("abc").validate(),
            Err(ValidationError::WebhookSecretTooShort)
        );
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config("whsec_long_enough").validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let output = format!("{:?}", config("super_secret_value"));
        assert!(!output.contains("super_secret_value"));
    }

    #[test]
    fn test_webhook_policy_follows_flag() {
        let mut cfg = config("whsec_long_enough");
        assert!(cfg.webhook_policy().accept_untyped_events);

        cfg.accept_untyped_events = false;
        assert!(!cfg.webhook_policy().accept_untyped_events);
    }
}
