//! NoteStore — the single owner of the notebook document
//!
//! Every read and write goes through one mutex around the resident document,
//! so an append (mutate + persist) is never observed half-applied and two
//! concurrent appends to the same topic both land.

use super::codec::DocumentCodec;
use super::document::{Document, Note};
use crate::error::NotebookResult;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Topic and note totals for the status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub topic_count: usize,
    pub note_count: usize,
}

pub struct NoteStore {
    codec: DocumentCodec,
    /// Loaded on first use; stays `None` until a load succeeds.
    document: Mutex<Option<Document>>,
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            codec: DocumentCodec::new(path),
            document: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        self.codec.path()
    }

    /// Append a note to `topic`, creating the topic on first use, and persist.
    /// If the write fails the append is rolled back and the error returned.
    pub fn add_note(&self, topic: &str, text: &str, timestamp: &str) -> NotebookResult<()> {
        let mut slot = self.document.lock();
        let document = self.resident(&mut slot)?;

        let append = document.append(topic, Note::new(text, timestamp));
        if let Err(e) = self.codec.save(document) {
            document.revert(append);
            log::error!("[NOTES] Failed to persist note for '{}': {}", topic, e);
            return Err(e);
        }

        log::debug!(
            "[NOTES] Added note to '{}' ({} notes)",
            topic,
            document.notes(topic).len()
        );
        Ok(())
    }

    /// Notes under `topic` in the order they were added. Unknown topics yield
    /// an empty list.
    pub fn get_notes(&self, topic: &str) -> NotebookResult<Vec<Note>> {
        let mut slot = self.document.lock();
        let document = self.resident(&mut slot)?;
        Ok(document.notes(topic).to_vec())
    }

    pub fn stats(&self) -> NotebookResult<StoreStats> {
        let mut slot = self.document.lock();
        let document = self.resident(&mut slot)?;
        Ok(StoreStats {
            topic_count: document.topic_count(),
            note_count: document.note_count(),
        })
    }

    fn resident<'a>(&self, slot: &'a mut Option<Document>) -> NotebookResult<&'a mut Document> {
        let document = match slot.take() {
            Some(document) => document,
            None => {
                let document = self.codec.load()?;
                log::info!(
                    "[NOTES] Loaded {} topics ({} notes) from {:?}",
                    document.topic_count(),
                    document.note_count(),
                    self.codec.path()
                );
                document
            }
        };
        Ok(slot.insert(document))
    }
}
