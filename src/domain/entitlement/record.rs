//! Persisted entitlement state for a user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Payment provider that granted an entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Razorpay,
    Paypal,
}

impl Provider {
    /// Returns the storage representation of the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Razorpay => "razorpay",
            Provider::Paypal => "paypal",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "razorpay" => Ok(Provider::Razorpay),
            "paypal" => Ok(Provider::Paypal),
            other => Err(ValidationError::invalid_format(
                "provider",
                format!("unknown provider '{}'", other),
            )),
        }
    }
}

/// The single current entitlement record for a user.
///
/// Only the entitlement store creates or replaces these; this subsystem never
/// deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementRecord {
    pub user_id: UserId,
    pub is_active: bool,
    pub provider: Provider,
    pub updated_at: Timestamp,
}

impl EntitlementRecord {
    pub fn new(user_id: UserId, is_active: bool, provider: Provider, updated_at: Timestamp) -> Self {
        Self {
            user_id,
            is_active,
            provider,
            updated_at,
        }
    }

    /// True when `other` holds the same entitlement state, ignoring `updated_at`.
    pub fn same_state_as(&self, other: &EntitlementRecord) -> bool {
        self.user_id == other.user_id
            && self.is_active == other.is_active
            && self.provider == other.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_round_trips_through_storage_string() {
        for provider in [Provider::Razorpay, Provider::Paypal] {
            assert_eq!(provider.as_str().parse::<Provider>().unwrap(), provider);
        }
    }

    #[test]
    fn provider_rejects_unknown_value() {
        assert!("stripe".parse::<Provider>().is_err());
        assert!("Razorpay".parse::<Provider>().is_err());
    }

    #[test]
    fn provider_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Provider::Razorpay).unwrap(), "\"razorpay\"");
    }

    #[test]
    fn same_state_ignores_updated_at() {
        let user = UserId::new("u1").unwrap();
        let a = EntitlementRecord::new(
            user.clone(),
            true,
            Provider::Razorpay,
            Timestamp::from_unix_secs(1),
        );
        let b = EntitlementRecord::new(user, true, Provider::Razorpay, Timestamp::from_unix_secs(2));

        assert!(a.same_state_as(&b));
        assert_ne!(a, b);
    }
}
