//! Core library for Drafy, a small local-first note-taking application.
//!
//! The primary entry point is [`EditingSession`], which holds the draft of one
//! note together with its undo/redo history and saves it through a
//! [`NoteStore`]. [`Notebook`] is the SQLite-backed store that also serves the
//! note list (listing, searching, deleting).
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    delete::DeleteResult,
    encyclopedia::{parse_extract_response, parse_search_response, SearchResult, NO_EXTRACT_TEXT},
    error::{DrafyError, Result},
    export::{export_notes, read_export, ExportNotes, NoteSnapshot, APP_VERSION},
    history::{EditHistory, MAX_HISTORY},
    note::{NewNote, Note, UNSAVED_NOTE_ID, UNTITLED_TITLE},
    notebook::Notebook,
    session::{DraftState, EditingSession},
    settings::{
        load_settings, load_settings_from, save_settings, save_settings_to, toggle_dark_mode_at,
        AppSettings,
    },
    storage::Storage,
    store::NoteStore,
};

#[cfg(feature = "encyclopedia")]
#[doc(inline)]
pub use core::encyclopedia::EncyclopediaClient;
