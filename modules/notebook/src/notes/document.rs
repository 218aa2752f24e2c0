//! Typed in-memory model of the notebook: topics in creation order, each with
//! an append-only list of notes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    /// Opaque, stored exactly as the caller sent it.
    pub timestamp: String,
}

impl Note {
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub topic: String,
    pub notes: Vec<Note>,
}

/// What an [`Document::append`] changed, so it can be undone if persistence fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Append {
    /// A note was pushed onto the entry at this position
    ExtendedTopic(usize),
    /// A new entry was pushed at the end
    CreatedTopic,
}

/// All topics and their notes. At most one entry per topic string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<TopicEntry>,
    index: HashMap<String, usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from decoded entries. Repeated topic labels are merged
    /// into the first occurrence, keeping note order.
    pub fn from_entries(entries: Vec<TopicEntry>) -> Self {
        let mut document = Self::new();
        for entry in entries {
            match document.index.get(&entry.topic) {
                Some(&pos) => {
                    log::warn!("[NOTES] Merging duplicate topic node '{}'", entry.topic);
                    document.entries[pos].notes.extend(entry.notes);
                }
                None => {
                    document.index.insert(entry.topic.clone(), document.entries.len());
                    document.entries.push(entry);
                }
            }
        }
        document
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    /// Notes under `topic` in append order; empty when the topic is unknown.
    pub fn notes(&self, topic: &str) -> &[Note] {
        self.index
            .get(topic)
            .map(|&pos| self.entries[pos].notes.as_slice())
            .unwrap_or(&[])
    }

    pub fn append(&mut self, topic: &str, note: Note) -> Append {
        if let Some(&pos) = self.index.get(topic) {
            self.entries[pos].notes.push(note);
            return Append::ExtendedTopic(pos);
        }

        self.index.insert(topic.to_string(), self.entries.len());
        self.entries.push(TopicEntry {
            topic: topic.to_string(),
            notes: vec![note],
        });
        Append::CreatedTopic
    }

    /// Undo the most recent [`Document::append`].
    pub fn revert(&mut self, append: Append) {
        match append {
            Append::ExtendedTopic(pos) => {
                if let Some(entry) = self.entries.get_mut(pos) {
                    entry.notes.pop();
                }
            }
            Append::CreatedTopic => {
                if let Some(entry) = self.entries.pop() {
                    self.index.remove(&entry.topic);
                }
            }
        }
    }

    pub fn topic_count(&self) -> usize {
        self.entries.len()
    }

    pub fn note_count(&self) -> usize {
        self.entries.iter().map(|e| e.notes.len()).sum()
    }
}
