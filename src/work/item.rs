use async_trait::async_trait;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Identity and creation instant of a work item.
///
/// The creation instant is a monotonic clock sample used only to compute
/// elapsed processing time, never compared as wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct WorkItemMeta {
    pub id: i64,
    pub created_at: Instant,
}

/// Errors that can occur during work item execution.
#[derive(Debug, thiserror::Error)]
pub enum WorkError {
    /// The item observed the cancellation token and stopped early.
    #[error("work item was cancelled")]
    Cancelled,
    /// The item's action failed.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Trait for work items executed by the processor loop.
///
/// Items run strictly one at a time. Long-running actions should check the
/// cancellation token at their own suspension points and return
/// `WorkError::Cancelled` when it fires.
#[async_trait]
pub trait WorkItem: Send + Sync {
    /// Identity and creation instant assigned by the factory.
    fn meta(&self) -> WorkItemMeta;

    /// Short variant name used in logs and metrics labels.
    fn kind(&self) -> &'static str;

    /// Execute the item's action.
    async fn execute(&self, cancel: CancellationToken) -> Result<(), WorkError>;
}
