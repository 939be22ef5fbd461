//! High-level note operations over a Drafy SQLite database.

use crate::{DeleteResult, DrafyError, NewNote, Note, NoteStore, Result, Storage};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// An open notes database.
///
/// `Notebook` backs the note list (listing, searching, deleting) and is the
/// [`NoteStore`] handed to editing sessions for loading and saving.
pub struct Notebook {
    storage: Storage,
}

impl Notebook {
    /// Creates a new, empty notes database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DrafyError::Database`] for any SQLite failure.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::create(path)?;
        Ok(Self { storage })
    }

    /// Opens an existing notes database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DrafyError::InvalidDatabase`] if the file is not a Drafy
    /// database, or [`crate::DrafyError::Database`] for any SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::open(path)?;
        Ok(Self { storage })
    }

    /// Opens the database at `path`, creating it when the file is missing.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::open_or_create(path)?;
        Ok(Self { storage })
    }

    /// Creates a notebook that is discarded when dropped.
    pub fn in_memory() -> Result<Self> {
        let storage = Storage::in_memory()?;
        Ok(Self { storage })
    }

    /// Returns the underlying SQLite connection.
    pub fn connection(&self) -> &Connection {
        self.storage.connection()
    }

    /// Returns all notes, most recently edited first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DrafyError::Database`] for any SQLite failure.
    pub fn list_all_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self.connection().prepare(
            "SELECT id, title, content, created_at, modified_at
             FROM notes
             ORDER BY modified_at DESC, id DESC",
        )?;
        let notes = stmt
            .query_map([], map_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Returns notes whose title or content contains `query`, ignoring case,
    /// in the same order as [`list_all_notes`](Self::list_all_notes).
    ///
    /// A blank query returns every note.
    pub fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        let notes = self.list_all_notes()?;
        Ok(notes.into_iter().filter(|note| note.matches(query)).collect())
    }

    /// Permanently removes a single note.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DrafyError::NoteNotFound`] if no note has `id`.
    pub fn delete_note(&mut self, id: i64) -> Result<DeleteResult> {
        let removed = self
            .storage
            .connection()
            .execute("DELETE FROM notes WHERE id = ?", [id])?;
        if removed == 0 {
            return Err(DrafyError::NoteNotFound(id));
        }
        log::info!("deleted note {id}");
        Ok(DeleteResult {
            deleted_count: 1,
            affected_ids: vec![id],
        })
    }

    /// Removes every note in `ids` in one transaction.
    ///
    /// IDs that do not exist are skipped rather than failing the batch.
    pub fn delete_notes(&mut self, ids: &[i64]) -> Result<DeleteResult> {
        let tx = self.storage.connection_mut().transaction()?;
        let mut result = DeleteResult::default();
        for &id in ids {
            if tx.execute("DELETE FROM notes WHERE id = ?", [id])? > 0 {
                result.deleted_count += 1;
                result.affected_ids.push(id);
            }
        }
        tx.commit()?;
        log::info!("deleted {} of {} requested notes", result.deleted_count, ids.len());
        Ok(result)
    }

    /// Returns the number of stored notes.
    pub fn count_notes(&self) -> Result<usize> {
        let count: i64 = self
            .connection()
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl NoteStore for Notebook {
    fn get_note(&self, id: i64) -> Result<Note> {
        self.connection()
            .query_row(
                "SELECT id, title, content, created_at, modified_at FROM notes WHERE id = ?",
                [id],
                map_note_row,
            )
            .optional()?
            .ok_or(DrafyError::NoteNotFound(id))
    }

    fn insert_note(&mut self, note: &NewNote) -> Result<i64> {
        let conn = self.storage.connection();
        conn.execute(
            "INSERT INTO notes (title, content, created_at, modified_at) VALUES (?, ?, ?, ?)",
            rusqlite::params![note.title, note.content, note.created_at, note.modified_at],
        )?;
        let id = conn.last_insert_rowid();
        log::info!("inserted note {id}");
        Ok(id)
    }

    fn update_note(&mut self, note: &Note) -> Result<()> {
        let changed = self.storage.connection().execute(
            "UPDATE notes SET title = ?1, content = ?2, created_at = ?3, modified_at = ?4 WHERE id = ?5",
            rusqlite::params![note.title, note.content, note.created_at, note.modified_at, note.id],
        )?;

        // SQLite UPDATE on a missing row succeeds but touches zero rows.
        if changed == 0 {
            return Err(DrafyError::NoteNotFound(note.id));
        }
        log::info!("updated note {}", note.id);
        Ok(())
    }
}

/// Row-mapping closure for `rusqlite::Row` → [`Note`].
///
/// Expects the column order `id, title, content, created_at, modified_at`.
fn map_note_row(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
        modified_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn new_note(title: &str, content: &str, at: i64) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: content.to_string(),
            created_at: at,
            modified_at: at,
        }
    }

    #[test]
    fn test_insert_and_get_note() {
        let mut nb = Notebook::in_memory().unwrap();
        let id = nb.insert_note(&new_note("Shopping", "milk", 100)).unwrap();

        assert_ne!(id, crate::UNSAVED_NOTE_ID);
        let note = nb.get_note(id).unwrap();
        assert_eq!(note.title, "Shopping");
        assert_eq!(note.content, "milk");
        assert_eq!(note.created_at, 100);
    }

    #[test]
    fn test_get_note_not_found() {
        let nb = Notebook::in_memory().unwrap();
        let result = nb.get_note(7);
        assert!(matches!(result, Err(DrafyError::NoteNotFound(7))));
    }

    #[test]
    fn test_update_note() {
        let mut nb = Notebook::in_memory().unwrap();
        let id = nb.insert_note(&new_note("a", "b", 100)).unwrap();

        let mut note = nb.get_note(id).unwrap();
        note.content = "changed".to_string();
        note.modified_at = 200;
        nb.update_note(&note).unwrap();

        let stored = nb.get_note(id).unwrap();
        assert_eq!(stored.content, "changed");
        assert_eq!(stored.created_at, 100);
        assert_eq!(stored.modified_at, 200);
    }

    #[test]
    fn test_update_note_not_found() {
        let mut nb = Notebook::in_memory().unwrap();
        let note = Note {
            id: 99,
            title: "ghost".to_string(),
            content: String::new(),
            created_at: 1,
            modified_at: 1,
        };
        assert!(matches!(nb.update_note(&note), Err(DrafyError::NoteNotFound(99))));
    }

    #[test]
    fn test_list_all_notes_most_recent_first() {
        let mut nb = Notebook::in_memory().unwrap();
        let old = nb.insert_note(&new_note("old", "", 100)).unwrap();
        let newest = nb.insert_note(&new_note("newest", "", 300)).unwrap();
        let middle = nb.insert_note(&new_note("middle", "", 200)).unwrap();

        let ids: Vec<i64> = nb.list_all_notes().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![newest, middle, old]);
    }

    #[test]
    fn test_search_notes_matches_title_or_content() {
        let mut nb = Notebook::in_memory().unwrap();
        nb.insert_note(&new_note("Shopping", "milk, eggs", 100)).unwrap();
        nb.insert_note(&new_note("Ideas", "Buy a BIKE", 200)).unwrap();
        nb.insert_note(&new_note("Travel", "Jakarta", 300)).unwrap();

        let titles = |q: &str| -> Vec<String> {
            nb.search_notes(q).unwrap().into_iter().map(|n| n.title).collect()
        };
        assert_eq!(titles("shop"), vec!["Shopping"]);
        assert_eq!(titles("bike"), vec!["Ideas"]);
        assert_eq!(titles(""), vec!["Travel", "Ideas", "Shopping"]);
        assert!(titles("nothing").is_empty());
    }

    #[test]
    fn test_delete_note() {
        let mut nb = Notebook::in_memory().unwrap();
        let id = nb.insert_note(&new_note("a", "", 1)).unwrap();

        let result = nb.delete_note(id).unwrap();
        assert_eq!(result.deleted_count, 1);
        assert_eq!(result.affected_ids, vec![id]);
        assert_eq!(nb.count_notes().unwrap(), 0);
    }

    #[test]
    fn test_delete_note_not_found() {
        let mut nb = Notebook::in_memory().unwrap();
        assert!(matches!(nb.delete_note(5), Err(DrafyError::NoteNotFound(5))));
    }

    #[test]
    fn test_delete_notes_skips_missing_ids() {
        let mut nb = Notebook::in_memory().unwrap();
        let a = nb.insert_note(&new_note("a", "", 1)).unwrap();
        let b = nb.insert_note(&new_note("b", "", 2)).unwrap();
        let c = nb.insert_note(&new_note("c", "", 3)).unwrap();

        let result = nb.delete_notes(&[a, 1234, c]).unwrap();
        assert_eq!(result.deleted_count, 2);
        assert_eq!(result.affected_ids, vec![a, c]);

        let remaining: Vec<i64> = nb.list_all_notes().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(remaining, vec![b]);
    }

    #[test]
    fn test_open_or_create_in_missing_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drafy").join("drafy.db");

        let mut nb = Notebook::open_or_create(&path).unwrap();
        let id = nb.insert_note(&new_note("first run", "", 1)).unwrap();
        drop(nb);

        let nb = Notebook::open_or_create(&path).unwrap();
        assert_eq!(nb.get_note(id).unwrap().title, "first run");
    }

    #[test]
    fn test_notes_persist_across_open() {
        let temp = NamedTempFile::new().unwrap();
        let id = {
            let mut nb = Notebook::create(temp.path()).unwrap();
            nb.insert_note(&new_note("kept", "body", 50)).unwrap()
        };

        let nb = Notebook::open(temp.path()).unwrap();
        assert_eq!(nb.get_note(id).unwrap().content, "body");
    }
}
