//! Wiring and submission facade for the work engine.

use super::factory::WorkItemFactory;
use super::item::WorkItem;
use super::processor::WorkProcessor;
use super::queue::{QueueWriter, WorkQueue};
use super::tracker::WorkTracker;
use crate::customer_store::CustomerStore;
use crate::document::{DocumentRenderer, TemplateSource};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Submission and status surface handed to the HTTP layer.
///
/// Submissions return `None` when the queue did not accept the item; the
/// caller must not treat any id as valid in that case.
pub struct WorkEngine {
    factory: Arc<WorkItemFactory>,
    tracker: Arc<WorkTracker>,
    writer: QueueWriter,
    shutdown: CancellationToken,
}

/// Create the work engine and the processor that drains it.
///
/// The processor is returned unstarted; spawn its `run` with the same
/// shutdown token.
pub fn create_engine(
    store: Arc<dyn CustomerStore>,
    renderer: Arc<dyn DocumentRenderer>,
    templates: Arc<dyn TemplateSource>,
    output_dir: PathBuf,
    shutdown: CancellationToken,
) -> (WorkProcessor, WorkEngine) {
    let queue = Arc::new(WorkQueue::new());
    let tracker = Arc::new(WorkTracker::new());
    let factory = Arc::new(WorkItemFactory::new(
        store,
        renderer,
        templates,
        Arc::clone(&tracker),
        queue.writer(),
        output_dir,
    ));

    let engine = WorkEngine {
        factory,
        tracker,
        writer: queue.writer(),
        shutdown,
    };
    let processor = WorkProcessor::new(queue);

    (processor, engine)
}

impl WorkEngine {
    /// Submit a notification item for one customer. Returns the item id,
    /// or `None` when the submission was not accepted.
    pub async fn submit_single(&self, customer_number: i64, date: NaiveDate) -> Option<i64> {
        let item = self.factory.customer_notification(customer_number, date);
        let id = item.meta().id;
        self.writer
            .enqueue(Box::new(item), &self.shutdown)
            .await
            .then_some(id)
    }

    /// Submit the all-customers fan-out item. Returns immediately with the
    /// item id; the work itself happens asynchronously.
    pub async fn submit_all(&self, date: NaiveDate) -> Option<i64> {
        let item = self.factory.all_notifications(date);
        let id = item.meta().id;
        self.writer
            .enqueue(Box::new(item), &self.shutdown)
            .await
            .then_some(id)
    }

    /// Elapsed processing time for a completed item. Unknown, queued and
    /// executing ids all read `None`.
    pub fn status(&self, id: i64) -> Option<Duration> {
        self.tracker.completion(id)
    }
}
