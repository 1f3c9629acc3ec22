//! Unbounded multi-producer mailbox for work items.
//!
//! Producers enqueue through cloneable [`QueueWriter`] handles; the processor
//! loop owns the [`WorkQueue`] and is the single consumer. Once closed the
//! queue rejects new writes but keeps whatever was already buffered.

use super::item::WorkItem;
use crate::server::metrics;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tokio_util::sync::CancellationToken;

struct Shared {
    buffer: Mutex<VecDeque<Box<dyn WorkItem>>>,
    notify: Notify,
    closed: AtomicBool,
}

/// Consumer side of the queue.
///
/// Ordering and at-most-once delivery are only defined for a single logical
/// consumer; the write side supports any number of concurrent producers.
pub struct WorkQueue {
    shared: Arc<Shared>,
}

/// Write-only capability handed to producers.
#[derive(Clone)]
pub struct QueueWriter {
    shared: Arc<Shared>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                buffer: Mutex::new(VecDeque::new()),
                notify: Notify::new(),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Create a writer handle for producers.
    pub fn writer(&self) -> QueueWriter {
        QueueWriter {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Wait until at least one item is buffered or the queue is closed.
    ///
    /// Returns `true` when an item is available and `false` once the queue is
    /// closed and fully drained. Buffered items are still reported as
    /// available after `close`, so callers drain before stopping.
    pub async fn dequeue_wait(&self) -> bool {
        loop {
            {
                let buffer = self.shared.buffer.lock().await;
                if !buffer.is_empty() {
                    return true;
                }
            }
            if self.shared.closed.load(Ordering::SeqCst) {
                return false;
            }
            // notify_one stores a permit when nobody is waiting yet, so a
            // push landing between the checks above and this await still
            // wakes us.
            self.shared.notify.notified().await;
        }
    }

    /// Pop the next buffered item without waiting.
    pub fn try_dequeue(&self) -> Option<Box<dyn WorkItem>> {
        let mut buffer = self.shared.buffer.try_lock().ok()?;
        let item = buffer.pop_front();
        if item.is_some() {
            metrics::set_work_queue_depth(buffer.len());
        }
        item
    }

    /// Stop accepting new writes. Idempotent; already-buffered items remain
    /// available to the consumer.
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.shared.notify.notify_one();
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueWriter {
    /// Enqueue an item for the consumer.
    ///
    /// Returns `true` once the item is buffered. Returns `false` when the
    /// queue is closed, or when `cancel` fires while waiting for the buffer
    /// on the slow path; producers treat `false` as "not accepted", never as
    /// a fault.
    pub async fn enqueue(&self, item: Box<dyn WorkItem>, cancel: &CancellationToken) -> bool {
        if self.shared.closed.load(Ordering::SeqCst) {
            return false;
        }

        // Fast path: the buffer lock is almost always uncontended.
        let item = match self.shared.buffer.try_lock() {
            Ok(mut buffer) => {
                buffer.push_back(item);
                metrics::set_work_queue_depth(buffer.len());
                self.shared.notify.notify_one();
                return true;
            }
            Err(_) => item,
        };

        // Slow path: wait for the buffer, racing the cancellation token.
        tokio::select! {
            mut buffer = self.shared.buffer.lock() => {
                // The queue may have been closed while we were waiting.
                if self.shared.closed.load(Ordering::SeqCst) {
                    return false;
                }
                buffer.push_back(item);
                metrics::set_work_queue_depth(buffer.len());
                self.shared.notify.notify_one();
                true
            }
            _ = cancel.cancelled() => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work::item::{WorkError, WorkItemMeta};
    use async_trait::async_trait;
    use std::time::{Duration, Instant};

    struct TestItem {
        meta: WorkItemMeta,
    }

    impl TestItem {
        fn boxed(id: i64) -> Box<dyn WorkItem> {
            Box::new(Self {
                meta: WorkItemMeta {
                    id,
                    created_at: Instant::now(),
                },
            })
        }
    }

    #[async_trait]
    impl WorkItem for TestItem {
        fn meta(&self) -> WorkItemMeta {
            self.meta
        }

        fn kind(&self) -> &'static str {
            "test"
        }

        async fn execute(&self, _cancel: CancellationToken) -> Result<(), WorkError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_enqueue_then_try_dequeue() {
        let queue = WorkQueue::new();
        let writer = queue.writer();
        let cancel = CancellationToken::new();

        assert!(writer.enqueue(TestItem::boxed(1), &cancel).await);

        let item = queue.try_dequeue().unwrap();
        assert_eq!(item.meta().id, 1);
        assert!(queue.try_dequeue().is_none());
    }

    #[tokio::test]
    async fn test_fifo_order_for_single_producer() {
        let queue = WorkQueue::new();
        let writer = queue.writer();
        let cancel = CancellationToken::new();

        for id in 1..=3 {
            assert!(writer.enqueue(TestItem::boxed(id), &cancel).await);
        }

        for expected in 1..=3 {
            assert_eq!(queue.try_dequeue().unwrap().meta().id, expected);
        }
    }

    #[tokio::test]
    async fn test_enqueue_after_close_is_rejected() {
        let queue = WorkQueue::new();
        let writer = queue.writer();
        let cancel = CancellationToken::new();

        queue.close();

        assert!(!writer.enqueue(TestItem::boxed(1), &cancel).await);
        assert!(queue.try_dequeue().is_none());
    }

    #[tokio::test]
    async fn test_close_keeps_buffered_items() {
        let queue = WorkQueue::new();
        let writer = queue.writer();
        let cancel = CancellationToken::new();

        assert!(writer.enqueue(TestItem::boxed(1), &cancel).await);
        assert!(writer.enqueue(TestItem::boxed(2), &cancel).await);

        queue.close();
        queue.close(); // idempotent

        assert!(!writer.enqueue(TestItem::boxed(3), &cancel).await);
        assert_eq!(queue.try_dequeue().unwrap().meta().id, 1);
        assert_eq!(queue.try_dequeue().unwrap().meta().id, 2);
        assert!(queue.try_dequeue().is_none());
    }

    #[tokio::test]
    async fn test_dequeue_wait_wakes_on_enqueue() {
        let queue = WorkQueue::new();
        let writer = queue.writer();

        let producer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let cancel = CancellationToken::new();
            writer.enqueue(TestItem::boxed(7), &cancel).await
        });

        assert!(queue.dequeue_wait().await);
        assert_eq!(queue.try_dequeue().unwrap().meta().id, 7);
        assert!(producer.await.unwrap());
    }

    #[tokio::test]
    async fn test_dequeue_wait_returns_false_when_closed_while_waiting() {
        let queue = Arc::new(WorkQueue::new());

        let waiter = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.dequeue_wait().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.close();

        assert!(!waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_dequeue_wait_reports_buffered_items_after_close() {
        let queue = WorkQueue::new();
        let writer = queue.writer();
        let cancel = CancellationToken::new();

        assert!(writer.enqueue(TestItem::boxed(1), &cancel).await);
        queue.close();

        assert!(queue.dequeue_wait().await);
        assert_eq!(queue.try_dequeue().unwrap().meta().id, 1);
        assert!(!queue.dequeue_wait().await);
    }

    #[tokio::test]
    async fn test_slow_path_enqueue_resolves_false_on_cancellation() {
        let queue = WorkQueue::new();
        let writer = queue.writer();
        let cancel = CancellationToken::new();

        // Hold the buffer lock so the producer takes the slow path.
        let guard = queue.shared.buffer.lock().await;

        let producer = {
            let cancel = cancel.clone();
            tokio::spawn(async move { writer.enqueue(TestItem::boxed(1), &cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        assert!(!producer.await.unwrap());
        drop(guard);
        assert!(queue.try_dequeue().is_none());
    }

    #[tokio::test]
    async fn test_slow_path_enqueue_resolves_false_after_close() {
        let queue = WorkQueue::new();
        let writer = queue.writer();
        let cancel = CancellationToken::new();

        let guard = queue.shared.buffer.lock().await;

        let producer = {
            let cancel = cancel.clone();
            tokio::spawn(async move { writer.enqueue(TestItem::boxed(1), &cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.close();
        drop(guard);

        assert!(!producer.await.unwrap());
        assert!(queue.try_dequeue().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_producers_lose_nothing() {
        let queue = WorkQueue::new();
        let cancel = CancellationToken::new();

        let mut producers = Vec::new();
        for id in 0..32 {
            let writer = queue.writer();
            let cancel = cancel.clone();
            producers.push(tokio::spawn(async move {
                writer.enqueue(TestItem::boxed(id), &cancel).await
            }));
        }
        for producer in producers {
            assert!(producer.await.unwrap());
        }

        let mut seen = std::collections::HashSet::new();
        while let Some(item) = queue.try_dequeue() {
            assert!(seen.insert(item.meta().id));
        }
        assert_eq!(seen.len(), 32);
    }
}
