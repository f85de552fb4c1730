//! Persistence layer for Church Manager backend.
//!
//! This crate contains:
//! - The `DocumentStore` abstraction over the remote document database
//! - The generic document envelope and decode helpers
//! - An in-memory store with push-based snapshot subscriptions
//! - The typed collection synchronizer consumed by the admin views

pub mod document;
pub mod memory;
pub mod metrics;
pub mod store;
pub mod sync;
