//! Concrete work item variants.

mod all_notifications;
mod completion;
mod customer_notification;
mod func;

pub use all_notifications::AllNotificationsItem;
pub use completion::CompletionItem;
pub use customer_notification::CustomerNotificationItem;
pub use func::FuncItem;

use chrono::NaiveDate;

/// Output file name for a rendered notification document:
/// `{customer}.{date}.txt` with the month left unpadded.
pub(crate) fn notification_file_name(customer_number: i64, date: NaiveDate) -> String {
    format!("{}.{}.txt", customer_number, date.format("%Y-%-m-%d"))
}
