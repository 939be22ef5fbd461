use serde::{Deserialize, Serialize};

/// Identifier carried by a draft that the store has not assigned an ID to yet.
pub const UNSAVED_NOTE_ID: i64 = 0;

/// Title written in place of an empty or blank one when a note is persisted.
pub const UNTITLED_TITLE: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub modified_at: i64,
}

/// A note that has not been inserted yet; the store assigns its ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub modified_at: i64,
}

impl Note {
    /// Returns `true` if this note has been assigned an ID by the store.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_NOTE_ID
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// A blank query matches every note.
    pub fn matches(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.content.to_lowercase().contains(&query)
    }
}

/// Returns `title`, or [`UNTITLED_TITLE`] when it is empty or whitespace.
pub fn title_or_placeholder(title: &str) -> String {
    if title.trim().is_empty() {
        UNTITLED_TITLE.to_string()
    } else {
        title.to_string()
    }
}
