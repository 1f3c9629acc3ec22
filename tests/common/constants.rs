//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (customer names, dates, game names),
//! update only this file.

// ============================================================================
// Test Customers and Charges
// ============================================================================

/// Customer with charges on the notification date
pub const CUSTOMER_WITH_CHARGES: &str = "Alice";

/// Customer with no charges at all
pub const CUSTOMER_WITHOUT_CHARGES: &str = "Bob";

/// Game name used for deterministic charges
pub const GAME_1_NAME: &str = "Factorio";

/// Second game name used for deterministic charges
pub const GAME_2_NAME: &str = "Rimworld";

/// Game id for [`GAME_1_NAME`]
pub const GAME_1_ID: i64 = 3;

/// Game id for [`GAME_2_NAME`]
pub const GAME_2_ID: i64 = 5;

// ============================================================================
// Test Dates
// ============================================================================

/// The notification date used in request paths (ISO format)
pub const NOTIFICATION_DATE: &str = "2026-05-01";

/// The notification date as it appears in output file names
pub const NOTIFICATION_DATE_IN_FILE_NAME: &str = "2026-5-01";

/// A date with no charges on it
pub const EMPTY_DATE: &str = "2026-06-15";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Maximum time to wait for a work item to finish (milliseconds)
pub const WORK_TIMEOUT_MS: u64 = 5000;

/// Polling interval when waiting for work items (milliseconds)
pub const WORK_POLL_INTERVAL_MS: u64 = 20;
