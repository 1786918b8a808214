use std::path::PathBuf;
use std::sync::Arc;

use calplus_core::storage::FileStorage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // No cached collection: every request reads or replaces the file
    storage: Arc<FileStorage>,
}

impl AppState {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        AppState {
            storage: Arc::new(FileStorage::new(data_file)),
        }
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }
}
