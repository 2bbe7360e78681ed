use thiserror::Error;

/// Errors surfaced by the gallery core.
///
/// Only `IndexOutOfRange` is expected to reach a caller; the other variants are
/// produced at collaborator seams and absorbed by the gallery according to
/// their policy (skip, fall back to empty, leave paused).
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Not a video file: {name} ({mime_type})")]
    InvalidInput { name: String, mime_type: String },

    #[error("Index {index} out of range for gallery of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Failed to resume playback of {handle}: {reason}")]
    PlaybackResume { handle: String, reason: String },

    #[error("Stored gallery is unreadable: {0}")]
    PersistenceRead(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Failed to encode gallery: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
