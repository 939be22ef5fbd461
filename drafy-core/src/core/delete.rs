//! Result type for note removal from a [`Notebook`](super::notebook::Notebook).
//!
//! Notes are removed either one at a time or as a batch selected in the note
//! list. Either way the caller receives a [`DeleteResult`] describing what was
//! actually removed; IDs that no longer existed are skipped in a batch.
//!
//! ## Serialization
//!
//! Fields serialize in camelCase (`deletedCount`, `affectedIds`), consistent
//! with all other return types in this project.
//!
//! ## Examples
//!
//! ```rust
//! use drafy_core::DeleteResult;
//!
//! let result = DeleteResult {
//!     deleted_count: 2,
//!     affected_ids: vec![4, 9],
//! };
//! let json = serde_json::to_string(&result).unwrap();
//! assert!(json.contains("deletedCount"));
//! assert!(json.contains("affectedIds"));
//! ```

use serde::{Deserialize, Serialize};

/// The outcome of a delete performed on a [`Notebook`](super::notebook::Notebook).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// The total number of notes that were permanently removed.
    pub deleted_count: usize,

    /// IDs of the notes that were removed, in request order.
    pub affected_ids: Vec<i64>,
}
