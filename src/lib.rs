//! Charge Notification Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod customer_store;
pub mod document;
pub mod notification;
pub mod server;
pub mod work;

// Re-export commonly used types for convenience
pub use customer_store::{CustomerStore, SqliteCustomerStore};
pub use server::{run_server, RequestsLoggingLevel};
pub use work::{create_engine, WorkEngine};
