//! Note export to a shareable JSON document.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::note::{title_or_placeholder, Note};
use crate::Result;

/// Crate version written into every export.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format version of [`ExportNotes`].
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// The fields of a note handed to the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSnapshot {
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub modified_at: i64,
}

impl From<&Note> for NoteSnapshot {
    fn from(note: &Note) -> Self {
        Self {
            title: title_or_placeholder(&note.title),
            content: note.content.clone(),
            created_at: note.created_at,
            modified_at: note.modified_at,
        }
    }
}

/// Top-level JSON structure of an export file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportNotes {
    pub version: u32,
    pub app_version: String,
    pub exported_at: i64,
    pub notes: Vec<NoteSnapshot>,
}

/// Writes `notes` to a new `notes_<dd-MM-yyyy_HH-mm-ss>.json` file in `dir`
/// and returns its path.
///
/// The directory is created if needed. An existing file is never overwritten;
/// a numeric suffix is added instead.
///
/// # Errors
///
/// Returns [`crate::DrafyError::Io`] if the directory or file cannot be
/// written, or [`crate::DrafyError::Json`] if serialisation fails.
pub fn export_notes<P: AsRef<Path>>(notes: &[NoteSnapshot], dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let now = chrono::Local::now();
    let export = ExportNotes {
        version: EXPORT_FORMAT_VERSION,
        app_version: APP_VERSION.to_string(),
        exported_at: now.timestamp(),
        notes: notes.to_vec(),
    };
    let json = serde_json::to_string_pretty(&export)?;

    let path = unique_export_path(dir, &now.format("%d-%m-%Y_%H-%M-%S").to_string());
    fs::write(&path, json)?;
    log::info!("exported {} notes to {}", notes.len(), path.display());
    Ok(path)
}

/// Reads an export file back.
pub fn read_export<P: AsRef<Path>>(path: P) -> Result<ExportNotes> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn unique_export_path(dir: &Path, stamp: &str) -> PathBuf {
    let mut path = dir.join(format!("notes_{stamp}.json"));
    let mut counter = 2;
    while path.exists() {
        path = dir.join(format!("notes_{stamp}-{counter}.json"));
        counter += 1;
    }
    path
}
