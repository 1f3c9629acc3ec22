mod models;
mod processor;

pub use models::{ChargeNotification, NotificationRow};
pub use processor::process_charges;
