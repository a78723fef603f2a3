//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum router exposing the webhook endpoint
//! - `postgres` - PostgreSQL entitlement store
//! - `memory` - In-memory entitlement store for tests and development

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryEntitlementStore;
pub use postgres::PostgresEntitlementStore;
