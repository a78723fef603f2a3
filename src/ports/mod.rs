//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EntitlementStore` - Durable entitlement state keyed by user

mod entitlement_store;

pub use entitlement_store::{EntitlementStore, StoreError};
