use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::error::{Result, TrackerError};

use super::document::Document;

/// Outcome of [JsonStore::load].
#[derive(Debug)]
pub struct Loaded {
    pub document: Document,
    /// Why an existing file couldn't be used. `document` is empty when this is set.
    pub recovered: Option<TrackerError>,
}

/// Keeps the [Document] in a single JSON file. There is no locking, a single invocation owns the
/// file for its lifetime.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing file yields an empty document, so does an unreadable one,
    /// in which case the failure is handed back in [Loaded::recovered].
    pub async fn load(&self) -> Loaded {
        match self.read_document().await {
            Ok(Some(document)) => Loaded {
                document,
                recovered: None,
            },
            Ok(None) => {
                debug!("No data file at {:?}, starting fresh", self.path);
                Loaded {
                    document: Document::default(),
                    recovered: None,
                }
            }
            Err(e) => {
                warn!("{e}. Falling back to an empty document");
                Loaded {
                    document: Document::default(),
                    recovered: Some(e),
                }
            }
        }
    }

    /// Moves the current file to `<name>.corrupt` so a following [save](Self::save) doesn't
    /// destroy it. Returns where it went.
    pub async fn set_aside(&self) -> Result<PathBuf> {
        let target = self.sibling(".corrupt");
        tokio::fs::rename(&self.path, &target).await?;
        warn!("Moved unreadable {:?} to {:?}", self.path, target);
        Ok(target)
    }

    async fn read_document(&self) -> Result<Option<Document>> {
        debug!("Reading {:?}", self.path);
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.read_error(e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| self.read_error(e))
    }

    fn read_error(&self, reason: impl ToString) -> TrackerError {
        TrackerError::StoreRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    /// Overwrites the file with `document`. The content goes to a sibling file first and is then
    /// renamed over the target, so readers see either the old or the new document.
    pub async fn save(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|v| !v.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut buffer = serde_json::to_vec_pretty(document)?;
        buffer.push(b'\n');

        let staging = self.sibling(".tmp");
        tokio::fs::write(&staging, &buffer).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        debug!("Saved {} bytes into {:?}", buffer.len(), self.path);
        Ok(())
    }

    fn sibling(&self, extension: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|v| v.to_os_string())
            .unwrap_or_else(|| OsString::from("chaoscatcher.json"));
        name.push(extension);
        self.path.with_file_name(name)
    }
}
