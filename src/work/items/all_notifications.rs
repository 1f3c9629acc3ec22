//! Work item rendering charge notifications for every customer.

use crate::customer_store::CustomerStore;
use crate::document::{DocumentRenderer, TemplateSource};
use crate::notification::{process_charges, ChargeNotification};
use crate::work::factory::WorkItemFactory;
use crate::work::item::{WorkError, WorkItem, WorkItemMeta};
use crate::work::queue::QueueWriter;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Renders a notification document for every customer with charges on the
/// given date.
///
/// Rendering fans out over a rayon pool inside `spawn_blocking`; that
/// parallelism stays internal to this item, the processor just awaits the
/// whole action as one unit. As its last action the item enqueues a
/// completion wrapper for itself, so its id reads complete only after every
/// document has been written.
pub struct AllNotificationsItem {
    meta: WorkItemMeta,
    date: NaiveDate,
    store: Arc<dyn CustomerStore>,
    renderer: Arc<dyn DocumentRenderer>,
    templates: Arc<dyn TemplateSource>,
    factory: Arc<WorkItemFactory>,
    writer: QueueWriter,
    output_dir: PathBuf,
}

impl AllNotificationsItem {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        meta: WorkItemMeta,
        date: NaiveDate,
        store: Arc<dyn CustomerStore>,
        renderer: Arc<dyn DocumentRenderer>,
        templates: Arc<dyn TemplateSource>,
        factory: Arc<WorkItemFactory>,
        writer: QueueWriter,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            meta,
            date,
            store,
            renderer,
            templates,
            factory,
            writer,
            output_dir,
        }
    }
}

#[async_trait]
impl WorkItem for AllNotificationsItem {
    fn meta(&self) -> WorkItemMeta {
        self.meta
    }

    fn kind(&self) -> &'static str {
        "all_notifications"
    }

    async fn execute(&self, cancel: CancellationToken) -> Result<(), WorkError> {
        if cancel.is_cancelled() {
            return Err(WorkError::Cancelled);
        }

        let notifications: Vec<ChargeNotification> = self
            .store
            .customers_with_charges(self.date)?
            .iter()
            .map(process_charges)
            .filter(|notification| !notification.rows.is_empty())
            .collect();
        info!(
            "Rendering {} charge notifications for {}",
            notifications.len(),
            self.date
        );

        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.output_dir))?;
        let template = self.templates.load()?;

        let renderer = Arc::clone(&self.renderer);
        let output_dir = self.output_dir.clone();
        let failures = tokio::task::spawn_blocking(move || {
            notifications
                .par_iter()
                .filter_map(|notification| {
                    let first_row = notification.rows.first()?;
                    let path = output_dir
                        .join(super::notification_file_name(notification.number, first_row.date));
                    match renderer.render(&template, notification, &path) {
                        Ok(()) => None,
                        Err(err) => Some((notification.number, err)),
                    }
                })
                .collect::<Vec<_>>()
        })
        .await
        .context("Render task failed")?;

        if !failures.is_empty() {
            let failed = failures.len();
            for (customer_number, err) in failures {
                error!(
                    "Failed to render notification for customer {}: {:#}",
                    customer_number, err
                );
            }
            return Err(anyhow!("Failed to render {} charge notifications", failed).into());
        }

        // Self-report through the queue: the wrapper cannot run before this
        // action has returned, so completion implies every document landed.
        let completion = self.factory.completion(self.meta);
        if !self.writer.enqueue(Box::new(completion), &cancel).await {
            debug!("Completion for work item {} was not accepted", self.meta.id);
        }
        Ok(())
    }
}
