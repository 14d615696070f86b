//! Last-refreshed bookkeeping that keeps a save from being picked up as an
//! outside change on the next scan.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait RefreshTracker: Send + Sync {
    fn set_last_refreshed(&self, item_path: &Path, at: DateTime<Utc>);
    fn last_refreshed(&self, item_path: &Path) -> Option<DateTime<Utc>>;
}

#[derive(Debug, Default)]
pub struct MemoryRefreshTracker {
    entries: Mutex<HashMap<PathBuf, DateTime<Utc>>>,
}

impl MemoryRefreshTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RefreshTracker for MemoryRefreshTracker {
    fn set_last_refreshed(&self, item_path: &Path, at: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(item_path.to_path_buf(), at);
    }

    fn last_refreshed(&self, item_path: &Path) -> Option<DateTime<Utc>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(item_path).copied()
    }
}

/// True when the metadata file changed after the item was last refreshed,
/// i.e. someone other than the saver touched it.
pub fn needs_refresh(
    tracker: &dyn RefreshTracker,
    item_path: &Path,
    file_modified: DateTime<Utc>,
) -> bool {
    match tracker.last_refreshed(item_path) {
        Some(refreshed) => file_modified > refreshed,
        None => true,
    }
}
