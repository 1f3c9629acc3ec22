//! Background processor draining the work queue.
//!
//! Runs queued items strictly one at a time, so the side effects of one item
//! are fully finished before the next item starts.

use super::item::{WorkError, WorkItem};
use super::queue::WorkQueue;
use crate::server::metrics;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Single sequential consumer of the work queue.
pub struct WorkProcessor {
    queue: Arc<WorkQueue>,
}

impl WorkProcessor {
    pub fn new(queue: Arc<WorkQueue>) -> Self {
        Self { queue }
    }

    /// Main processing loop - call from a spawned task.
    ///
    /// A failing item is logged and abandoned; the loop keeps going.
    /// Cancellation is the only fail-stop: the loop closes the queue so
    /// producers are rejected from that point on, and anything still
    /// buffered is left unexecuted.
    pub async fn run(self, shutdown: CancellationToken) {
        info!("Work processor starting");

        'run: loop {
            tokio::select! {
                available = self.queue.dequeue_wait() => {
                    if !available {
                        // Closed and fully drained.
                        break;
                    }
                    loop {
                        if shutdown.is_cancelled() {
                            info!("Work processor received shutdown signal");
                            break 'run;
                        }
                        let Some(item) = self.queue.try_dequeue() else {
                            break;
                        };
                        if !self.execute_item(item, &shutdown).await {
                            break 'run;
                        }
                    }
                }
                _ = shutdown.cancelled() => {
                    info!("Work processor received shutdown signal");
                    break;
                }
            }
        }

        self.queue.close();
        info!("Work processor stopped");
    }

    /// Execute one item, isolating its failure from the loop.
    ///
    /// Returns `false` when the item surfaced cancellation and the loop
    /// should stop.
    async fn execute_item(&self, item: Box<dyn WorkItem>, shutdown: &CancellationToken) -> bool {
        let meta = item.meta();
        let kind = item.kind();
        debug!("Executing {} work item {}", kind, meta.id);

        let started = Instant::now();
        match item.execute(shutdown.clone()).await {
            Ok(()) => {
                let elapsed = started.elapsed();
                metrics::record_work_item_execution(kind, "success", elapsed);
                debug!("Work item {} finished in {:?}", meta.id, elapsed);
                true
            }
            Err(WorkError::Cancelled) => {
                metrics::record_work_item_execution(kind, "cancelled", started.elapsed());
                info!("Work item {} was cancelled, stopping processor", meta.id);
                false
            }
            Err(WorkError::Failed(e)) => {
                metrics::record_work_item_execution(kind, "failed", started.elapsed());
                error!("Work item {} ({}) failed: {:#}", meta.id, kind, e);
                true
            }
        }
    }
}
