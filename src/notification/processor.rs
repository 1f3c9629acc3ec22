//! Turns a customer's raw charge list into a renderable notification.

use super::models::{ChargeNotification, NotificationRow};
use crate::customer_store::CustomerCharges;
use std::collections::HashMap;

/// Group a customer's charges by game, one row per game with the summed
/// cost. Rows keep the order in which their game first appears in the
/// charge list; each row carries the date of that first charge.
pub fn process_charges(data: &CustomerCharges) -> ChargeNotification {
    let mut rows: Vec<NotificationRow> = Vec::new();
    let mut row_by_game: HashMap<i64, usize> = HashMap::new();

    for charge in &data.charges {
        match row_by_game.get(&charge.game_id) {
            Some(&index) => rows[index].cost += charge.cost,
            None => {
                row_by_game.insert(charge.game_id, rows.len());
                rows.push(NotificationRow {
                    date: charge.charge_date,
                    name: charge.game_name.clone(),
                    cost: charge.cost,
                });
            }
        }
    }

    ChargeNotification {
        number: data.customer.number,
        name: data.customer.name.clone(),
        total_cost: rows.iter().map(|row| row.cost).sum(),
        rows,
    }
}
