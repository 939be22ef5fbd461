//! Editing session: one note's draft, its undo/redo history and its saved flag.

use crate::core::note::title_or_placeholder;
use crate::{
    DrafyError, EditHistory, NewNote, Note, NoteSnapshot, NoteStore, Result, UNSAVED_NOTE_ID,
};
use serde::Serialize;
use tokio::sync::watch;

/// Immutable view of a draft, republished after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    /// Store-assigned ID, or [`UNSAVED_NOTE_ID`] before the first save.
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub modified_at: i64,
    /// Number of characters (Unicode scalar values) in `content`.
    pub character_count: usize,
    /// `true` only while the initial load from the store is outstanding.
    pub is_loading: bool,
    /// `false` whenever title or content changed since the last load or save.
    pub is_saved: bool,
}

impl DraftState {
    fn blank(now: i64) -> Self {
        Self {
            id: UNSAVED_NOTE_ID,
            title: String::new(),
            content: String::new(),
            created_at: now,
            modified_at: now,
            character_count: 0,
            is_loading: false,
            is_saved: false,
        }
    }

    fn loaded(note: Note) -> Self {
        Self {
            id: note.id,
            character_count: note.content.chars().count(),
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            modified_at: note.modified_at,
            is_loading: false,
            is_saved: true,
        }
    }

    /// Returns `true` once the store has assigned this draft an ID.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_NOTE_ID
    }
}

/// Owns the draft of a single note while it is open for editing.
///
/// All mutations take `&mut self`, so a save can never overlap another save or
/// an edit. Observers either read [`state`](Self::state) or hold a receiver
/// from [`subscribe`](Self::subscribe).
pub struct EditingSession<S: NoteStore> {
    store: S,
    draft: DraftState,
    history: EditHistory,
    publisher: watch::Sender<DraftState>,
}

impl<S: NoteStore> EditingSession<S> {
    /// Starts a blank draft. The history holds one empty entry.
    pub fn new(store: S) -> Self {
        let draft = DraftState::blank(now());
        let (publisher, _) = watch::channel(draft.clone());
        Self {
            store,
            draft,
            history: EditHistory::seeded(""),
            publisher,
        }
    }

    /// Starts a session that is waiting for [`load`](Self::load).
    ///
    /// Lets a caller subscribe before the load so the loading phase is observed.
    pub fn pending(store: S) -> Self {
        let mut session = Self::new(store);
        session.history = EditHistory::new();
        session.draft.is_loading = true;
        session.publish();
        session
    }

    /// Opens the note `id` for editing.
    ///
    /// A missing note yields a blank draft rather than an error.
    ///
    /// # Errors
    ///
    /// Propagates any store failure other than [`DrafyError::NoteNotFound`].
    pub fn open(store: S, id: i64) -> Result<Self> {
        let mut session = Self::pending(store);
        session.load(id)?;
        Ok(session)
    }

    /// Replaces the draft with note `id` from the store and reseeds the history.
    ///
    /// When the note does not exist the draft stays blank and the history is
    /// seeded with the empty content, the same as a fresh session.
    ///
    /// # Errors
    ///
    /// Propagates any store failure other than [`DrafyError::NoteNotFound`];
    /// the draft leaves the loading state either way.
    pub fn load(&mut self, id: i64) -> Result<()> {
        self.draft.is_loading = true;
        self.publish();

        match self.store.get_note(id) {
            Ok(note) => {
                log::debug!("loaded note {id} into editing session");
                self.history = EditHistory::seeded(note.content.as_str());
                self.draft = DraftState::loaded(note);
            }
            Err(DrafyError::NoteNotFound(_)) => {
                log::warn!("note {id} not found, starting with an empty draft");
                self.draft = DraftState::blank(now());
                self.history = EditHistory::seeded("");
            }
            Err(e) => {
                log::warn!("failed to load note {id}: {e}");
                self.draft.is_loading = false;
                self.publish();
                return Err(e);
            }
        }

        self.publish();
        Ok(())
    }

    /// The current draft.
    pub fn state(&self) -> &DraftState {
        &self.draft
    }

    /// Returns a receiver that observes every published draft.
    pub fn subscribe(&self) -> watch::Receiver<DraftState> {
        self.publisher.subscribe()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Ends the session and hands back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.draft.is_saved = false;
        self.publish();
    }

    /// Replaces the content and records it in the history.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.history.record(content.as_str());
        self.show_content(content);
    }

    /// Appends `text` to the content as a new paragraph, e.g. a looked-up
    /// encyclopedia extract. Recorded in the history like any edit.
    pub fn append_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let content = if self.draft.content.trim().is_empty() {
            text.to_string()
        } else {
            format!("{}\n\n{}", self.draft.content.trim_end(), text)
        };
        self.set_content(content);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Steps back one content snapshot. Returns `false` if already at the oldest.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(content) => {
                let content = content.to_string();
                self.show_content(content);
                true
            }
            None => false,
        }
    }

    /// Steps forward one content snapshot. Returns `false` if already at the newest.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(content) => {
                let content = content.to_string();
                self.show_content(content);
                true
            }
            None => false,
        }
    }

    /// Persists the draft and returns the note as written.
    ///
    /// The first save inserts and adopts the store-assigned ID; later saves
    /// update in place and keep `created_at`. A blank title is written as
    /// [`crate::UNTITLED_TITLE`] without changing the draft's own title.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged. The draft is left as it was and
    /// nothing is retried.
    pub fn save(&mut self) -> Result<Note> {
        self.save_at(now())
    }

    /// [`save`](Self::save) with `now` (Unix seconds) as the save moment.
    pub fn save_at(&mut self, now: i64) -> Result<Note> {
        let persisted = self.draft.is_persisted();
        let created_at = if persisted { self.draft.created_at } else { now };

        let mut note = Note {
            id: self.draft.id,
            title: title_or_placeholder(&self.draft.title),
            content: self.draft.content.clone(),
            created_at,
            modified_at: now.max(created_at),
        };

        let outcome = if persisted {
            self.store.update_note(&note)
        } else {
            self.store
                .insert_note(&NewNote {
                    title: note.title.clone(),
                    content: note.content.clone(),
                    created_at: note.created_at,
                    modified_at: note.modified_at,
                })
                .map(|id| note.id = id)
        };
        if let Err(e) = outcome {
            log::warn!("failed to save note {}: {e}", self.draft.id);
            return Err(e);
        }

        self.draft.id = note.id;
        self.draft.created_at = note.created_at;
        self.draft.modified_at = note.modified_at;
        self.draft.is_saved = true;
        self.publish();
        Ok(note)
    }

    /// A read-only copy of the draft for the export collaborator.
    pub fn export_snapshot(&self) -> NoteSnapshot {
        NoteSnapshot {
            title: title_or_placeholder(&self.draft.title),
            content: self.draft.content.clone(),
            created_at: self.draft.created_at,
            modified_at: self.draft.modified_at,
        }
    }

    fn show_content(&mut self, content: String) {
        self.draft.character_count = content.chars().count();
        self.draft.content = content;
        self.draft.is_saved = false;
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.draft.clone());
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
