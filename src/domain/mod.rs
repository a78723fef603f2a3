//! Domain layer - Core business logic.
//!
//! - `foundation` - Shared value objects and identifiers
//! - `entitlement` - Webhook verification, payment events, entitlement records

pub mod entitlement;
pub mod foundation;
