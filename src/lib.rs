//! Payment Webhook - Entitlement grants from payment processor notifications
//!
//! This crate receives Razorpay payment webhooks, authenticates them with
//! HMAC-SHA256 over the raw body, and records the resulting entitlement
//! through an idempotent upsert so processor retries are always safe.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
