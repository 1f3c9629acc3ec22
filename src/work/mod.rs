//! Asynchronous work item engine.
//!
//! Producers submit items through a factory plus an unbounded queue; a
//! single sequential processor drains the queue and isolates per-item
//! faults. Composite items self-report completion through the tracker.

mod engine;
mod factory;
mod item;
mod items;
mod processor;
mod queue;
mod tracker;

pub use engine::{create_engine, WorkEngine};
pub use factory::WorkItemFactory;
pub use item::{WorkError, WorkItem, WorkItemMeta};
pub use items::{AllNotificationsItem, CompletionItem, CustomerNotificationItem, FuncItem};
pub use processor::WorkProcessor;
pub use queue::{QueueWriter, WorkQueue};
pub use tracker::WorkTracker;
