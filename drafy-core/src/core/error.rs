//! Error types for the Drafy core library.

use thiserror::Error;

/// All errors that can occur within the Drafy core library.
#[derive(Debug, Error)]
pub enum DrafyError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record store other than SQLite failed to persist a note.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A note ID was requested that does not exist in the store.
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// The opened file is not a valid Drafy notes database.
    #[error("Invalid database: {0}")]
    InvalidDatabase(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or export data could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An encyclopedia lookup failed or returned an unexpected body.
    #[error("Encyclopedia error: {0}")]
    Encyclopedia(String),
}

/// Convenience alias that pins the error type to [`DrafyError`].
pub type Result<T> = std::result::Result<T, DrafyError>;

impl DrafyError {
    /// Returns `true` for failures of the record store to write or read a note.
    ///
    /// A missing note is not a persistence failure.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Persistence(_))
    }

    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::Persistence(msg) => format!("Failed to save: {msg}"),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::InvalidDatabase(_) => "Could not open notes database".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::Encyclopedia(e) => format!("Could not fetch article: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_classification() {
        assert!(DrafyError::Persistence("disk full".to_string()).is_persistence());
        assert!(DrafyError::Database(rusqlite::Error::InvalidQuery).is_persistence());
        assert!(!DrafyError::NoteNotFound(7).is_persistence());
    }

    #[test]
    fn test_user_message_for_missing_note() {
        let e = DrafyError::NoteNotFound(42);
        assert_eq!(e.user_message(), "Note no longer exists");
        assert!(e.to_string().contains("42"));
    }
}
