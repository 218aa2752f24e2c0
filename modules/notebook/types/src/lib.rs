//! Shared types for the notebook service and its RPC clients.

use serde::{Deserialize, Serialize};

/// Status string returned by a successful `add_note` call.
pub const NOTE_ADDED: &str = "Note added successfully.";

/// Reference returned by `lookup_reference` when the encyclopedia has no match.
pub const NO_REFERENCE_FOUND: &str = "No additional information found in the encyclopedia.";

// =====================================================
// RPC Request Types
// =====================================================

/// File a note under a topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNoteRequest {
    /// Grouping key (case-sensitive, must not be blank)
    pub topic: String,
    /// Note body, may be empty
    pub text: String,
    /// Caller-supplied timestamp, stored verbatim
    pub timestamp: String,
}

/// List every note filed under a topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNotesRequest {
    pub topic: String,
}

/// Ask the encyclopedia for a reference link on a topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupReferenceRequest {
    pub topic: String,
}

// =====================================================
// RPC Response Types
// =====================================================

/// Machine-readable failure category carried next to the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedCall,
    StorageUnavailable,
    RemoteLookupFailed,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_kind: None,
        }
    }

    pub fn err(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
            error_kind: Some(kind),
        }
    }
}

// =====================================================
// Domain Types
// =====================================================

/// A single note as seen by RPC callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteView {
    pub text: String,
    pub timestamp: String,
}

/// Result of `add_note`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNoteResult {
    pub status: String,
}

/// Result of `get_notes`: notes in the order they were added
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesResult {
    pub topic: String,
    pub notes: Vec<NoteView>,
}

/// Result of `lookup_reference`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceResult {
    /// A link to the article, or [`NO_REFERENCE_FOUND`]
    pub reference: String,
    /// False when the encyclopedia had nothing for the topic
    pub found: bool,
}

/// Service health status
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub database_path: String,
    pub topic_count: usize,
    pub note_count: usize,
    pub notes_added: u64,
    pub lookups_served: u64,
}
