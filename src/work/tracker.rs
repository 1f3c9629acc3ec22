//! Completion registry for work items.
//!
//! Maps item id to elapsed processing time. Entries are never evicted; they
//! live for the lifetime of the process. An id that is unknown, still queued
//! or currently executing all read the same way: not complete.

use super::item::WorkItemMeta;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use tracing::debug;

pub struct WorkTracker {
    completed: RwLock<HashMap<i64, Duration>>,
}

impl WorkTracker {
    pub fn new() -> Self {
        Self {
            completed: RwLock::new(HashMap::new()),
        }
    }

    /// Record an item as complete, measuring elapsed time from its creation
    /// instant. Re-recording the same id just replaces the stored duration.
    pub fn record_complete(&self, meta: WorkItemMeta) {
        let elapsed = meta.created_at.elapsed();
        self.completed.write().unwrap().insert(meta.id, elapsed);
        debug!("Work item {} completed in {:?}", meta.id, elapsed);
    }

    /// Elapsed processing time for a completed item, `None` if no completion
    /// has been recorded for that id.
    pub fn completion(&self, id: i64) -> Option<Duration> {
        self.completed.read().unwrap().get(&id).copied()
    }
}

impl Default for WorkTracker {
    fn default() -> Self {
        Self::new()
    }
}
