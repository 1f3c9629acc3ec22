//! Work item that records another item's completion.

use crate::work::item::{WorkError, WorkItem, WorkItemMeta};
use crate::work::tracker::WorkTracker;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Marks the wrapped item complete in the tracker.
///
/// Carries only the wrapped item's metadata, never the item itself. Going
/// through the queue is the point: the single consumer does not run this
/// wrapper until the wrapped item's action has fully returned, so recording
/// happens only after all of its side effects have landed.
pub struct CompletionItem {
    meta: WorkItemMeta,
    wrapped: WorkItemMeta,
    tracker: Arc<WorkTracker>,
}

impl CompletionItem {
    pub(crate) fn new(meta: WorkItemMeta, wrapped: WorkItemMeta, tracker: Arc<WorkTracker>) -> Self {
        Self {
            meta,
            wrapped,
            tracker,
        }
    }
}

#[async_trait]
impl WorkItem for CompletionItem {
    fn meta(&self) -> WorkItemMeta {
        self.meta
    }

    fn kind(&self) -> &'static str {
        "completion"
    }

    async fn execute(&self, _cancel: CancellationToken) -> Result<(), WorkError> {
        self.tracker.record_complete(self.wrapped);
        Ok(())
    }
}
