//! Internal domain modules for the Drafy core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod delete;
pub mod encyclopedia;
pub mod error;
pub mod export;
pub mod history;
pub mod note;
pub mod notebook;
pub mod session;
pub mod settings;
pub mod storage;
pub mod store;

#[doc(inline)]
pub use delete::DeleteResult;
#[doc(inline)]
pub use encyclopedia::SearchResult;
#[doc(inline)]
pub use error::{DrafyError, Result};
#[doc(inline)]
pub use export::{export_notes, ExportNotes, NoteSnapshot, APP_VERSION};
#[doc(inline)]
pub use history::{EditHistory, MAX_HISTORY};
#[doc(inline)]
pub use note::{NewNote, Note, UNSAVED_NOTE_ID, UNTITLED_TITLE};
#[doc(inline)]
pub use notebook::Notebook;
#[doc(inline)]
pub use session::{DraftState, EditingSession};
#[doc(inline)]
pub use settings::AppSettings;
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use store::NoteStore;
