//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient, NOTIFICATION_DATE};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_submit_all() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(&server.base_url);
//!
//!     let response = client.submit_all_notifications(NOTIFICATION_DATE).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use constants::*;
pub use server::TestServer;

#[allow(unused_imports)]
pub use fixtures::{
    empty_date, notification_date, seed_customer_with_charges, seed_customer_without_charges,
};
