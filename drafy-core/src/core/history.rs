//! Bounded linear undo/redo history over note content.

use std::collections::VecDeque;

/// Maximum number of content snapshots kept per editing session.
pub const MAX_HISTORY: usize = 50;

/// Ordered content snapshots plus a cursor marking the one currently shown.
///
/// Recording after an undo discards the abandoned redo branch. Once more than
/// [`MAX_HISTORY`] entries exist the oldest is evicted and the cursor shifts
/// with it, so it keeps pointing at the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    entries: VecDeque<String>,
    cursor: usize,
}

impl EditHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history holding `content` as its only entry.
    pub fn seeded(content: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.record(content);
        history
    }

    /// Appends `content` as the newest snapshot and moves the cursor onto it.
    pub fn record(&mut self, content: impl Into<String>) {
        if !self.entries.is_empty() && self.cursor + 1 < self.entries.len() {
            let dropped = self.entries.len() - self.cursor - 1;
            self.entries.truncate(self.cursor + 1);
            log::debug!("discarded {dropped} redo entries");
        }

        self.entries.push_back(content.into());
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
            self.cursor -= 1;
        }
    }

    /// Moves the cursor one step back and returns the snapshot now current.
    ///
    /// Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Moves the cursor one step forward and returns the snapshot now current.
    ///
    /// Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The snapshot under the cursor, or `None` for an empty history.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates snapshots from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tracks_most_recent() {
        let mut history = EditHistory::new();
        for i in 0..10 {
            history.record(format!("v{i}"));
            assert_eq!(history.len(), i + 1);
            assert_eq!(history.current(), Some(format!("v{i}").as_str()));
            assert!(!history.can_redo());
        }
    }

    #[test]
    fn test_empty_history_is_inert() {
        let mut history = EditHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), None);
    }

    #[test]
    fn test_undo_then_redo_restores_exactly() {
        let mut history = EditHistory::seeded("");
        history.record("héllo");
        history.record("héllo wörld\n");

        assert_eq!(history.undo(), Some("héllo"));
        assert_eq!(history.redo(), Some("héllo wörld\n"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_undo_stops_at_oldest() {
        let mut history = EditHistory::seeded("first");
        history.record("second");

        assert_eq!(history.undo(), Some("first"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), Some("first"));
    }

    #[test]
    fn test_record_after_undo_prunes_redo_branch() {
        let mut history = EditHistory::seeded("");
        history.record("a");
        history.record("ab");
        history.record("abc");

        history.undo();
        history.undo();
        history.record("aX");

        assert_eq!(history.entries().collect::<Vec<_>>(), vec!["", "a", "aX"]);
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_cap_evicts_oldest_and_keeps_cursor_on_newest() {
        let mut history = EditHistory::new();
        for i in 0..MAX_HISTORY {
            history.record(i.to_string());
        }
        assert_eq!(history.len(), MAX_HISTORY);

        history.record("51st");
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.cursor(), MAX_HISTORY - 1);
        assert_eq!(history.current(), Some("51st"));
        assert_eq!(history.entries().next(), Some("1"));
    }

    #[test]
    fn test_sixty_edits_lose_oldest_ten() {
        let mut history = EditHistory::new();
        for i in 0..60 {
            history.record(format!("edit {i}"));
        }
        assert_eq!(history.len(), 50);

        let mut oldest = history.current().map(str::to_string);
        while let Some(prev) = history.undo() {
            oldest = Some(prev.to_string());
        }
        assert_eq!(oldest.as_deref(), Some("edit 10"));
    }
}
