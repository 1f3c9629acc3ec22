//! Database schema for customers and game charges.

/// SQL schema for the customer database.
pub const CUSTOMER_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    number INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    register_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS game_charges (
    number INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_number INTEGER NOT NULL,
    game_id INTEGER NOT NULL,
    game_name TEXT NOT NULL,
    cost INTEGER NOT NULL,
    charge_date TEXT NOT NULL,
    FOREIGN KEY (customer_number) REFERENCES customers(number) ON DELETE CASCADE
);

-- Charges are almost always read per customer and date
CREATE INDEX IF NOT EXISTS idx_game_charges_customer_date
    ON game_charges(customer_number, charge_date DESC, game_id);
"#;

/// Current schema version.
pub const CUSTOMER_SCHEMA_VERSION: i32 = 1;
