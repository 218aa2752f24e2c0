//! On-disk representation of the notebook document.
//!
//! The file is a JSON tree: a root object holding a `topics` array, each topic
//! node carrying its label and an ordered `notes` array. Saves go through a
//! temp file in the same directory and a rename, so a reader sees either the
//! previous document or the new one.

use super::document::{Document, TopicEntry};
use crate::error::{NotebookError, NotebookResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct DocumentFile {
    #[serde(default)]
    topics: Vec<TopicEntry>,
}

#[derive(Serialize)]
struct DocumentFileRef<'a> {
    topics: &'a [TopicEntry],
}

pub struct DocumentCodec {
    path: PathBuf,
}

impl DocumentCodec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing or zero-length file is a fresh, empty
    /// notebook; anything unreadable or unparseable is `StorageUnavailable`.
    pub fn load(&self) -> NotebookResult<Document> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("[NOTES] No document at {:?}, starting empty", self.path);
                return Ok(Document::new());
            }
            Err(e) => return Err(NotebookError::storage(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            log::info!("[NOTES] Document {:?} is empty, starting empty", self.path);
            return Ok(Document::new());
        }

        let file: DocumentFile = serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("[NOTES] Document {:?} is malformed: {}", self.path, e);
            NotebookError::storage(&self.path, format!("malformed document: {}", e))
        })?;

        Ok(Document::from_entries(file.topics))
    }

    /// Write the whole document atomically.
    pub fn save(&self, document: &Document) -> NotebookResult<()> {
        let mut bytes = serde_json::to_vec_pretty(&DocumentFileRef {
            topics: document.entries(),
        })
        .map_err(|e| NotebookError::storage(&self.path, e))?;
        bytes.push(b'\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| NotebookError::storage(dir, e))?;

        let mut temp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| NotebookError::storage(dir, e))?;
        temp.write_all(&bytes)
            .map_err(|e| NotebookError::storage(temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| NotebookError::storage(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| NotebookError::storage(&self.path, e.error))?;

        Ok(())
    }
}
