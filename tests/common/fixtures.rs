//! Test fixtures
//!
//! Creates the on-disk resources a test server needs (document template,
//! database, output directory) and seeds deterministic customers.

use super::constants::*;
use charge_notification_server::customer_store::{Customer, CustomerStore};
use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;

/// Template exercising every element type the renderer supports.
const TEST_TEMPLATE: &str = r#"
[[header]]
type = "horizontal_line"
thickness = 2

[[header]]
type = "text"
style = "bold"
alignment = "center"
value = "Charge notification for {{CUSTOMER_NAME}}"

[[header]]
type = "horizontal_line"

[[body]]
type = "charge_table"
heading = ["Date", "Game", "Cost"]
cells = ["{{CHARGE_DATE}}", "{{CHARGE_NAME}}", "{{CHARGE_COST}}"]

[[body]]
type = "text"
alignment = "right"
value = "Total: {{CUSTOMER_TOTAL}}"
"#;

/// On-disk resources for one test server, cleaned up together on drop.
pub struct TestDirs {
    pub template_path: PathBuf,
    pub db_path: PathBuf,
    pub output_dir: PathBuf,
    pub temp_dir: TempDir,
}

/// Create a temp directory holding the template, the database path and the
/// document output directory.
pub fn create_test_dirs() -> TestDirs {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let template_path = temp_dir.path().join("template.toml");
    std::fs::write(&template_path, TEST_TEMPLATE).expect("Failed to write template");
    let db_path = temp_dir.path().join("customers.db");
    let output_dir = temp_dir.path().join("documents");

    TestDirs {
        template_path,
        db_path,
        output_dir,
        temp_dir,
    }
}

/// The notification date all deterministic charges are placed on.
pub fn notification_date() -> NaiveDate {
    NOTIFICATION_DATE.parse().expect("Invalid test date")
}

/// A date no fixture ever places charges on.
pub fn empty_date() -> NaiveDate {
    EMPTY_DATE.parse().expect("Invalid test date")
}

/// Insert [`CUSTOMER_WITH_CHARGES`] plus two charges on the notification
/// date, one per game.
pub fn seed_customer_with_charges(store: &dyn CustomerStore) -> Customer {
    let customer = store
        .insert_customer(CUSTOMER_WITH_CHARGES)
        .expect("Failed to insert customer");
    store
        .insert_charge(customer.number, GAME_1_ID, GAME_1_NAME, 10, notification_date())
        .expect("Failed to insert charge");
    store
        .insert_charge(customer.number, GAME_2_ID, GAME_2_NAME, 25, notification_date())
        .expect("Failed to insert charge");
    customer
}

/// Insert [`CUSTOMER_WITHOUT_CHARGES`] with no charges at all.
pub fn seed_customer_without_charges(store: &dyn CustomerStore) -> Customer {
    store
        .insert_customer(CUSTOMER_WITHOUT_CHARGES)
        .expect("Failed to insert customer")
}
