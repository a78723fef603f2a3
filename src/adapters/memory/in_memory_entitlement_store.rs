//! In-Memory Entitlement Store Adapter
//!
//! Stores entitlement records in a process-local map.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entitlement::{EntitlementRecord, Provider};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{EntitlementStore, StoreError};

/// In-memory storage for entitlement records
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntitlementStore {
    records: Arc<RwLock<HashMap<UserId, EntitlementRecord>>>,
}

impl InMemoryEntitlementStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Snapshot of all stored records
    pub async fn records(&self) -> Vec<EntitlementRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl EntitlementStore for InMemoryEntitlementStore {
    async fn upsert(
        &self,
        user_id: &UserId,
        is_active: bool,
        provider: Provider,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let record = EntitlementRecord::new(user_id.clone(), is_active, provider, now);

        // Holding the write lock across compare and insert keeps same-user writes serialized.
        let mut records = self.records.write().await;
        match records.get(user_id) {
            Some(existing) if now.is_before(&existing.updated_at) => {
                tracing::debug!(user_id = %user_id, "Skipping stale entitlement write");
            }
            Some(existing) if existing.same_state_as(&record) => {
                tracing::debug!(user_id = %user_id, "Entitlement unchanged, advancing updated_at");
                records.insert(user_id.clone(), record);
            }
            _ => {
                records.insert(user_id.clone(), record);
            }
        }
        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<EntitlementRecord>, StoreError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }
}
