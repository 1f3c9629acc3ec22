//! Work item rendering one customer's charge notification document.

use crate::customer_store::CustomerStore;
use crate::document::{DocumentRenderer, TemplateSource};
use crate::notification::process_charges;
use crate::work::item::{WorkError, WorkItem, WorkItemMeta};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Renders the charge notification document for a single customer and date.
///
/// An unknown customer, or a customer without charges on that date, is a
/// no-op rather than a fault. The item reports nothing back; its id never
/// shows up as complete in the tracker.
pub struct CustomerNotificationItem {
    meta: WorkItemMeta,
    customer_number: i64,
    date: NaiveDate,
    store: Arc<dyn CustomerStore>,
    renderer: Arc<dyn DocumentRenderer>,
    templates: Arc<dyn TemplateSource>,
    output_dir: PathBuf,
}

impl CustomerNotificationItem {
    pub(crate) fn new(
        meta: WorkItemMeta,
        customer_number: i64,
        date: NaiveDate,
        store: Arc<dyn CustomerStore>,
        renderer: Arc<dyn DocumentRenderer>,
        templates: Arc<dyn TemplateSource>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            meta,
            customer_number,
            date,
            store,
            renderer,
            templates,
            output_dir,
        }
    }
}

#[async_trait]
impl WorkItem for CustomerNotificationItem {
    fn meta(&self) -> WorkItemMeta {
        self.meta
    }

    fn kind(&self) -> &'static str {
        "customer_notification"
    }

    async fn execute(&self, cancel: CancellationToken) -> Result<(), WorkError> {
        if cancel.is_cancelled() {
            return Err(WorkError::Cancelled);
        }

        let Some(data) = self
            .store
            .customer_with_charges(self.customer_number, self.date)?
        else {
            debug!(
                "Customer {} does not exist, nothing to render",
                self.customer_number
            );
            return Ok(());
        };

        let notification = process_charges(&data);
        let Some(first_row) = notification.rows.first() else {
            debug!(
                "Customer {} has no charges on {}, nothing to render",
                self.customer_number, self.date
            );
            return Ok(());
        };

        let template = self.templates.load()?;
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.output_dir))?;

        let path = self
            .output_dir
            .join(super::notification_file_name(notification.number, first_row.date));
        self.renderer.render(&template, &notification, &path)?;
        debug!(
            "Rendered charge notification for customer {} at {:?}",
            notification.number, path
        );
        Ok(())
    }
}
