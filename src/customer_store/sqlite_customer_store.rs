//! SQLite implementation of the customer store.

use super::models::{Customer, CustomerCharges, GameCharge};
use super::schema::{CUSTOMER_SCHEMA_SQL, CUSTOMER_SCHEMA_VERSION};
use super::CustomerStore;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Games a seeded charge can be drawn from.
const GAME_POOL: &[(i64, &str)] = &[
    (0, "The Talos Principle"),
    (1, "The Talos Principle 2"),
    (2, "The Witness"),
    (3, "Braid"),
    (4, "Trinity"),
    (5, "Animal Well"),
    (6, "Slipways"),
    (7, "Stardew Valley"),
    (8, "SHENZHEN I/O"),
    (9, "Factorio"),
];

pub struct SqliteCustomerStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCustomerStore {
    /// Open or create a customer database.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open customer database: {:?}", path))?;
        Self::init(conn)
    }

    /// Create an in-memory database (for testing).
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        conn.execute_batch(CUSTOMER_SCHEMA_SQL)?;
        conn.pragma_update(None, "user_version", CUSTOMER_SCHEMA_VERSION)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn format_date(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    fn row_to_customer(row: &rusqlite::Row) -> rusqlite::Result<Customer> {
        let register_date_str: String = row.get("register_date")?;
        Ok(Customer {
            number: row.get("number")?,
            name: row.get("name")?,
            register_date: DateTime::parse_from_rfc3339(&register_date_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    fn row_to_charge(row: &rusqlite::Row) -> rusqlite::Result<GameCharge> {
        let charge_date_str: String = row.get("charge_date")?;
        Ok(GameCharge {
            number: row.get("number")?,
            customer_number: row.get("customer_number")?,
            game_id: row.get("game_id")?,
            game_name: row.get("game_name")?,
            cost: row.get("cost")?,
            charge_date: NaiveDate::parse_from_str(&charge_date_str, "%Y-%m-%d")
                .unwrap_or_else(|_| Utc::now().date_naive()),
        })
    }
}

impl CustomerStore for SqliteCustomerStore {
    fn customer(&self, number: i64) -> Result<Option<Customer>> {
        let conn = self.conn.lock().unwrap();
        let customer = conn
            .query_row(
                "SELECT number, name, register_date FROM customers WHERE number = ?1",
                params![number],
                Self::row_to_customer,
            )
            .optional()?;
        Ok(customer)
    }

    fn customers(&self) -> Result<Vec<Customer>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT number, name, register_date FROM customers ORDER BY number")?;
        let customers = stmt
            .query_map([], Self::row_to_customer)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(customers)
    }

    fn insert_customer(&self, name: &str) -> Result<Customer> {
        let conn = self.conn.lock().unwrap();
        let register_date = Utc::now();
        conn.execute(
            "INSERT INTO customers (name, register_date) VALUES (?1, ?2)",
            params![name, register_date.to_rfc3339()],
        )?;
        Ok(Customer {
            number: conn.last_insert_rowid(),
            name: name.to_string(),
            register_date,
        })
    }

    fn remove_customer(&self, number: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count = conn.execute("DELETE FROM customers WHERE number = ?1", params![number])?;
        Ok(count > 0)
    }

    fn charge(&self, number: i64) -> Result<Option<GameCharge>> {
        let conn = self.conn.lock().unwrap();
        let charge = conn
            .query_row(
                "SELECT number, customer_number, game_id, game_name, cost, charge_date
                 FROM game_charges WHERE number = ?1",
                params![number],
                Self::row_to_charge,
            )
            .optional()?;
        Ok(charge)
    }

    fn charges_for_date(&self, customer_number: i64, date: NaiveDate) -> Result<Vec<GameCharge>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT number, customer_number, game_id, game_name, cost, charge_date
             FROM game_charges WHERE customer_number = ?1 AND charge_date = ?2
             ORDER BY number",
        )?;
        let charges = stmt
            .query_map(
                params![customer_number, Self::format_date(date)],
                Self::row_to_charge,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(charges)
    }

    fn insert_charge(
        &self,
        customer_number: i64,
        game_id: i64,
        game_name: &str,
        cost: i64,
        charge_date: NaiveDate,
    ) -> Result<GameCharge> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO game_charges (customer_number, game_id, game_name, cost, charge_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                customer_number,
                game_id,
                game_name,
                cost,
                Self::format_date(charge_date)
            ],
        )
        .with_context(|| format!("Failed to insert charge for customer {}", customer_number))?;
        Ok(GameCharge {
            number: conn.last_insert_rowid(),
            customer_number,
            game_id,
            game_name: game_name.to_string(),
            cost,
            charge_date,
        })
    }

    fn remove_charge(&self, number: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count = conn.execute(
            "DELETE FROM game_charges WHERE number = ?1",
            params![number],
        )?;
        Ok(count > 0)
    }

    fn customer_with_charges(
        &self,
        customer_number: i64,
        date: NaiveDate,
    ) -> Result<Option<CustomerCharges>> {
        let Some(customer) = self.customer(customer_number)? else {
            return Ok(None);
        };
        let charges = self.charges_for_date(customer_number, date)?;
        Ok(Some(CustomerCharges { customer, charges }))
    }

    fn customers_with_charges(&self, date: NaiveDate) -> Result<Vec<CustomerCharges>> {
        let customers = self.customers()?;
        let mut result = Vec::with_capacity(customers.len());
        for customer in customers {
            let charges = self.charges_for_date(customer.number, date)?;
            result.push(CustomerCharges { customer, charges });
        }
        Ok(result)
    }

    fn seed_customers(&self, count: usize) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let register_date = Utc::now().to_rfc3339();

        let tx = conn.transaction()?;
        for i in 0..count {
            tx.execute(
                "INSERT INTO customers (name, register_date) VALUES (?1, ?2)",
                params![format!("Customer {}", i), register_date],
            )?;
        }
        tx.commit()?;
        Ok(count)
    }

    fn seed_charges(&self, count: usize, date: NaiveDate) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let mut rng = rand::rng();
        let date_str = Self::format_date(date);
        let mut inserted = 0;

        let tx = conn.transaction()?;
        {
            let mut select = tx.prepare("SELECT number FROM customers ORDER BY number")?;
            let customer_numbers = select
                .query_map([], |row| row.get::<_, i64>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut insert = tx.prepare(
                "INSERT INTO game_charges (customer_number, game_id, game_name, cost, charge_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for customer_number in customer_numbers {
                let charges = if count == 0 {
                    0
                } else {
                    rng.random_range(0..count)
                };
                for _ in 0..charges {
                    let (game_id, game_name) = GAME_POOL[rng.random_range(0..GAME_POOL.len())];
                    let cost: i64 = rng.random_range(1..999);
                    insert.execute(params![customer_number, game_id, game_name, cost, date_str])?;
                    inserted += 1;
                }
            }
        }
        tx.commit()?;
        Ok(inserted)
    }
}
