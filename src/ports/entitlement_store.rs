//! Entitlement store port.
//!
//! Defines the contract for persisting entitlement state granted by payment
//! webhooks. Implementations handle the actual storage operations.
//!
//! # Design
//!
//! - **One record per user**: `user_id` is the unique key
//! - **Idempotent upsert**: repeating an upsert leaves the same state,
//!   only `updated_at` may advance
//! - **Last write wins**: a write older than the stored `updated_at` is dropped
//! - **Atomic**: readers never observe a partially applied write

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entitlement::{EntitlementRecord, Provider};
use crate::domain::foundation::{Timestamp, UserId};

/// Errors surfaced by entitlement store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Transient failure (network, timeout, pool exhausted). Safe to retry.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Constraint or data violation. Retrying the same write will fail again.
    #[error("Store rejected write: {0}")]
    Rejected(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Repository port for entitlement persistence.
///
/// Implementations are shared across concurrent requests and must be safe
/// for concurrent use.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// Create or replace the entitlement record for `user_id`.
    ///
    /// # Errors
    ///
    /// - `Unavailable` on transient backend failure
    /// - `Rejected` on constraint violations
    async fn upsert(
        &self,
        user_id: &UserId,
        is_active: bool,
        provider: Provider,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// Find the current entitlement record for a user.
    ///
    /// Returns `None` if no payment has been recorded for the user.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<EntitlementRecord>, StoreError>;
}
