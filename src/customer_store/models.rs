use chrono::{DateTime, NaiveDate, Utc};

/// A platform customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub number: i64,
    pub name: String,
    pub register_date: DateTime<Utc>,
}

/// A single charge a customer accrued for a game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCharge {
    pub number: i64,
    pub customer_number: i64,
    pub game_id: i64,
    pub game_name: String,
    pub cost: i64,
    pub charge_date: NaiveDate,
}

/// A customer paired with their charges for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerCharges {
    pub customer: Customer,
    pub charges: Vec<GameCharge>,
}
