mod models;
mod schema;
mod sqlite_customer_store;

pub use models::{Customer, CustomerCharges, GameCharge};
pub use sqlite_customer_store::SqliteCustomerStore;

use anyhow::Result;
use chrono::NaiveDate;

/// Storage for customers and their per-game charges.
pub trait CustomerStore: Send + Sync {
    fn customer(&self, number: i64) -> Result<Option<Customer>>;
    fn customers(&self) -> Result<Vec<Customer>>;
    fn insert_customer(&self, name: &str) -> Result<Customer>;
    /// Returns false when no customer with that number exists.
    fn remove_customer(&self, number: i64) -> Result<bool>;

    fn charge(&self, number: i64) -> Result<Option<GameCharge>>;
    fn charges_for_date(&self, customer_number: i64, date: NaiveDate) -> Result<Vec<GameCharge>>;
    fn insert_charge(
        &self,
        customer_number: i64,
        game_id: i64,
        game_name: &str,
        cost: i64,
        charge_date: NaiveDate,
    ) -> Result<GameCharge>;
    fn remove_charge(&self, number: i64) -> Result<bool>;

    /// One customer together with their charges on the given date.
    /// `None` when the customer is unknown; the charge list may be empty.
    fn customer_with_charges(
        &self,
        customer_number: i64,
        date: NaiveDate,
    ) -> Result<Option<CustomerCharges>>;

    /// Every customer together with their charges on the given date,
    /// including customers without any charges that day.
    fn customers_with_charges(&self, date: NaiveDate) -> Result<Vec<CustomerCharges>>;

    /// Insert `count` demo customers. Returns how many were inserted.
    fn seed_customers(&self, count: usize) -> Result<usize>;

    /// Insert up to `count` random charges per existing customer, all dated
    /// `date`. Returns the total number of charges inserted.
    fn seed_charges(&self, count: usize, date: NaiveDate) -> Result<usize>;
}
