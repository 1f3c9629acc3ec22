//! Ad-hoc work item wrapping an async closure.

use crate::work::item::{WorkError, WorkItem, WorkItemMeta};
use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

pub(crate) type WorkFn =
    Box<dyn Fn(CancellationToken) -> BoxFuture<'static, Result<(), WorkError>> + Send + Sync>;

/// Runs an arbitrary async closure as a work item.
///
/// Useful for one-off work and for exercising the queue without committing
/// to a dedicated item variant.
pub struct FuncItem {
    meta: WorkItemMeta,
    func: WorkFn,
}

impl FuncItem {
    pub(crate) fn new(meta: WorkItemMeta, func: WorkFn) -> Self {
        Self { meta, func }
    }
}

#[async_trait]
impl WorkItem for FuncItem {
    fn meta(&self) -> WorkItemMeta {
        self.meta
    }

    fn kind(&self) -> &'static str {
        "func"
    }

    async fn execute(&self, cancel: CancellationToken) -> Result<(), WorkError> {
        (self.func)(cancel).await
    }
}
