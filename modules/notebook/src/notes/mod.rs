//! Notes system — topic-indexed notes persisted to a single JSON document
//!
//! `document` is the typed model, `codec` reads and atomically rewrites the
//! file, and `store` owns the document behind one lock.

pub mod codec;
pub mod document;
pub mod store;

pub use document::Note;
pub use store::NoteStore;
