//! The record-store seam between an editing session and persistence.

use crate::{NewNote, Note, Result};

/// Load and save operations an [`EditingSession`](crate::EditingSession) needs.
///
/// [`Notebook`](crate::Notebook) is the SQLite implementation. Implementations
/// report failures and never retry; retry policy belongs to the caller.
pub trait NoteStore {
    /// Fetches a single note.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DrafyError::NoteNotFound`] if no note has `id`.
    fn get_note(&self, id: i64) -> Result<Note>;

    /// Inserts `note` and returns the ID the store assigned to it.
    fn insert_note(&mut self, note: &NewNote) -> Result<i64>;

    /// Overwrites the record identified by `note.id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DrafyError::NoteNotFound`] if no record has that ID.
    fn update_note(&mut self, note: &Note) -> Result<()>;
}

impl<S: NoteStore + ?Sized> NoteStore for &mut S {
    fn get_note(&self, id: i64) -> Result<Note> {
        (**self).get_note(id)
    }

    fn insert_note(&mut self, note: &NewNote) -> Result<i64> {
        (**self).insert_note(note)
    }

    fn update_note(&mut self, note: &Note) -> Result<()> {
        (**self).update_note(note)
    }
}
