//! Construction point for all work item variants.

use super::item::{WorkError, WorkItemMeta};
use super::items::{AllNotificationsItem, CompletionItem, CustomerNotificationItem, FuncItem};
use super::queue::QueueWriter;
use super::tracker::WorkTracker;
use crate::customer_store::CustomerStore;
use crate::document::{DocumentRenderer, TemplateSource};
use chrono::NaiveDate;
use futures::FutureExt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Creates work items, stamping each with a process-unique id.
///
/// Ids come from a single atomic counter owned by the factory, so they are
/// strictly increasing and duplicate-free even under concurrent producers.
/// Each variant is wired with the capabilities it needs at construction
/// time, nothing is looked up during execution.
pub struct WorkItemFactory {
    next_id: AtomicI64,
    store: Arc<dyn CustomerStore>,
    renderer: Arc<dyn DocumentRenderer>,
    templates: Arc<dyn TemplateSource>,
    tracker: Arc<WorkTracker>,
    writer: QueueWriter,
    output_dir: PathBuf,
}

impl WorkItemFactory {
    pub fn new(
        store: Arc<dyn CustomerStore>,
        renderer: Arc<dyn DocumentRenderer>,
        templates: Arc<dyn TemplateSource>,
        tracker: Arc<WorkTracker>,
        writer: QueueWriter,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            next_id: AtomicI64::new(0),
            store,
            renderer,
            templates,
            tracker,
            writer,
            output_dir,
        }
    }

    /// Ids start at 1 and never repeat for the lifetime of the factory.
    fn next_meta(&self) -> WorkItemMeta {
        WorkItemMeta {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            created_at: Instant::now(),
        }
    }

    /// Notification document for one customer on one date.
    pub fn customer_notification(
        &self,
        customer_number: i64,
        date: NaiveDate,
    ) -> CustomerNotificationItem {
        CustomerNotificationItem::new(
            self.next_meta(),
            customer_number,
            date,
            Arc::clone(&self.store),
            Arc::clone(&self.renderer),
            Arc::clone(&self.templates),
            self.output_dir.clone(),
        )
    }

    /// Notification documents for every customer on one date.
    ///
    /// The item self-reports through a completion wrapper as its last
    /// action, so it carries the factory and the queue writer.
    pub fn all_notifications(self: &Arc<Self>, date: NaiveDate) -> AllNotificationsItem {
        AllNotificationsItem::new(
            self.next_meta(),
            date,
            Arc::clone(&self.store),
            Arc::clone(&self.renderer),
            Arc::clone(&self.templates),
            Arc::clone(self),
            self.writer.clone(),
            self.output_dir.clone(),
        )
    }

    /// Wrapper that marks `wrapped` complete once it has gone through the
    /// queue. The wrapper gets its own fresh id.
    pub fn completion(&self, wrapped: WorkItemMeta) -> CompletionItem {
        CompletionItem::new(self.next_meta(), wrapped, Arc::clone(&self.tracker))
    }

    /// Ad-hoc item from an async closure.
    pub fn from_fn<F, Fut>(&self, func: F) -> FuncItem
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), WorkError>> + Send + 'static,
    {
        FuncItem::new(self.next_meta(), Box::new(move |cancel| func(cancel).boxed()))
    }
}
