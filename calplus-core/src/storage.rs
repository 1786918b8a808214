//! Persistence of the whole event collection.
//!
//! The collection is always read and written as one unit. There is no
//! merge: the last successful `save` wins.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::error::PlannerResult;
use crate::event::Record;

/// Backend that can load and replace the full event collection.
///
/// No schema is enforced: elements that are not valid events load as
/// [`Record::Malformed`] and are saved back as they were.
pub trait EventStorage {
    fn load(&self) -> impl Future<Output = PlannerResult<Vec<Record>>> + Send;

    fn save(&self, records: &[Record]) -> impl Future<Output = PlannerResult<()>> + Send;
}

/// A single pretty-printed JSON array on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes writers within this process; the file is still last-writer-wins.
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl EventStorage for FileStorage {
    /// A missing or blank file is an empty collection.
    async fn load(&self) -> PlannerResult<Vec<Record>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, records: &[Record]) -> PlannerResult<()> {
        let body = serde_json::to_string_pretty(records)?;
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write next to the target and rename so readers never see a partial file
        let temp = self.temp_path();
        tokio::fs::write(&temp, body).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        tracing::info!(count = records.len(), path = %self.path.display(), "Saved event collection");
        Ok(())
    }
}
