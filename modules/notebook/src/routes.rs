//! Axum route handlers for the notebook RPC API.

use crate::encyclopedia_client::{EncyclopediaClient, Reference};
use crate::error::{NotebookError, NotebookResult};
use crate::notes::{Note, NoteStore};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use notebook_types::*;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct AppState {
    pub store: Arc<NoteStore>,
    pub encyclopedia: EncyclopediaClient,
    pub start_time: Instant,
    pub notes_added: AtomicU64,
    pub lookups_served: AtomicU64,
}

impl AppState {
    pub fn new(store: NoteStore, encyclopedia: EncyclopediaClient) -> Self {
        Self {
            store: Arc::new(store),
            encyclopedia,
            start_time: Instant::now(),
            notes_added: AtomicU64::new(0),
            lookups_served: AtomicU64::new(0),
        }
    }
}

pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/rpc/add_note", axum::routing::post(add_note))
        .route("/rpc/get_notes", axum::routing::post(get_notes))
        .route("/rpc/lookup_reference", axum::routing::post(lookup_reference))
        .route("/rpc/status", axum::routing::get(status))
        .with_state(state)
}

type RpcReply<T> = (StatusCode, Json<RpcResponse<T>>);

fn reply<T: Serialize>(result: NotebookResult<T>) -> RpcReply<T> {
    match result {
        Ok(data) => (StatusCode::OK, Json(RpcResponse::ok(data))),
        Err(e) => {
            log::warn!("[RPC] {}", e);
            (e.status_code(), Json(RpcResponse::err(e.kind(), e.to_string())))
        }
    }
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> NotebookResult<T> {
    body.map(|Json(req)| req)
        .map_err(|e| NotebookError::MalformedCall(e.body_text()))
}

fn require_topic(topic: &str) -> NotebookResult<()> {
    if topic.trim().is_empty() {
        return Err(NotebookError::MalformedCall("topic is empty".into()));
    }
    Ok(())
}

/// Run a blocking store operation off the async workers.
async fn with_store<T, F>(state: &AppState, op: F) -> NotebookResult<T>
where
    T: Send + 'static,
    F: FnOnce(&NoteStore) -> NotebookResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    let path = store.path().to_path_buf();
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| NotebookError::storage(path, format!("store task aborted: {}", e)))?
}

fn to_view(note: Note) -> NoteView {
    NoteView {
        text: note.text,
        timestamp: note.timestamp,
    }
}

// POST /rpc/add_note
pub async fn add_note(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddNoteRequest>, JsonRejection>,
) -> RpcReply<AddNoteResult> {
    reply(handle_add_note(&state, body).await)
}

async fn handle_add_note(
    state: &AppState,
    body: Result<Json<AddNoteRequest>, JsonRejection>,
) -> NotebookResult<AddNoteResult> {
    let req = parse_body(body)?;
    require_topic(&req.topic)?;

    with_store(state, move |store| {
        store.add_note(&req.topic, &req.text, &req.timestamp)
    })
    .await?;

    state.notes_added.fetch_add(1, Ordering::Relaxed);
    Ok(AddNoteResult {
        status: NOTE_ADDED.to_string(),
    })
}

// POST /rpc/get_notes
pub async fn get_notes(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GetNotesRequest>, JsonRejection>,
) -> RpcReply<NotesResult> {
    reply(handle_get_notes(&state, body).await)
}

async fn handle_get_notes(
    state: &AppState,
    body: Result<Json<GetNotesRequest>, JsonRejection>,
) -> NotebookResult<NotesResult> {
    let req = parse_body(body)?;
    require_topic(&req.topic)?;

    let topic = req.topic.clone();
    let notes = with_store(state, move |store| store.get_notes(&topic)).await?;

    Ok(NotesResult {
        topic: req.topic,
        notes: notes.into_iter().map(to_view).collect(),
    })
}

// POST /rpc/lookup_reference
pub async fn lookup_reference(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LookupReferenceRequest>, JsonRejection>,
) -> RpcReply<ReferenceResult> {
    reply(handle_lookup_reference(&state, body).await)
}

async fn handle_lookup_reference(
    state: &AppState,
    body: Result<Json<LookupReferenceRequest>, JsonRejection>,
) -> NotebookResult<ReferenceResult> {
    let req = parse_body(body)?;
    require_topic(&req.topic)?;

    // no store lock is held here
    let reference = state.encyclopedia.lookup(&req.topic).await?;
    state.lookups_served.fetch_add(1, Ordering::Relaxed);

    Ok(match reference {
        Reference::Found(link) => ReferenceResult {
            reference: link,
            found: true,
        },
        Reference::NotFound => {
            log::info!("[LOOKUP] Nothing found for '{}'", req.topic);
            ReferenceResult {
                reference: NO_REFERENCE_FOUND.to_string(),
                found: false,
            }
        }
    })
}

// GET /rpc/status
pub async fn status(State(state): State<Arc<AppState>>) -> RpcReply<ServiceStatus> {
    reply(handle_status(&state).await)
}

async fn handle_status(state: &AppState) -> NotebookResult<ServiceStatus> {
    let stats = with_store(state, |store| store.stats()).await?;

    Ok(ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        database_path: state.store.path().display().to_string(),
        topic_count: stats.topic_count,
        note_count: stats.note_count,
        notes_added: state.notes_added.load(Ordering::Relaxed),
        lookups_served: state.lookups_served.load(Ordering::Relaxed),
    })
}
