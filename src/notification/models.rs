use chrono::NaiveDate;

/// One line of a charge notification: all of a customer's charges for a
/// single game on the notification date, summed.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRow {
    pub date: NaiveDate,
    pub name: String,
    pub cost: i64,
}

/// A renderable charge notification for one customer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeNotification {
    pub number: i64,
    pub name: String,
    pub total_cost: i64,
    pub rows: Vec<NotificationRow>,
}
