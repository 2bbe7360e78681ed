use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Broad media kind, as declared by a mime type or guessed from an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" | "tiff" | "tif" => Self::Image,
            "webm" | "mp4" | "m4v" | "mkv" | "avi" | "mov" | "ogv" => Self::Video,
            "mp3" | "ogg" | "flac" | "wav" | "m4a" => Self::Audio,
            _ => Self::Other,
        }
    }

    pub fn from_mime(mime_type: &str) -> Self {
        match mime_type.split('/').next() {
            Some("video") => Self::Video,
            Some("image") => Self::Image,
            Some("audio") => Self::Audio,
            _ => Self::Other,
        }
    }

    /// Mime type string declared for a file extension.
    pub fn mime_for_extension(ext: &str) -> String {
        let ext = ext.to_lowercase();
        let sub = match ext.as_str() {
            "mkv" => "x-matroska",
            "avi" => "x-msvideo",
            "mov" => "quicktime",
            "m4v" => "mp4",
            "ogv" => "ogg",
            "jpg" => "jpeg",
            "tif" => "tiff",
            "mp3" => "mpeg",
            other => other,
        };
        match Self::from_extension(&ext) {
            Self::Video => format!("video/{sub}"),
            Self::Image => format!("image/{sub}"),
            Self::Audio => format!("audio/{sub}"),
            Self::Other => "application/octet-stream".to_string(),
        }
    }
}

/// Opaque reference resolvable to playable bytes (an object URL, a file URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaHandle(String);

impl MediaHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(format!("file://{}", path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path behind a `file://` handle.
    pub fn local_path(&self) -> Option<&Path> {
        self.0.strip_prefix("file://").map(Path::new)
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file-like input handed over by the selection or drop surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCandidate {
    pub name: String,
    pub mime_type: String,
    pub handle: MediaHandle,
}

impl MediaCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, handle: MediaHandle) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            handle,
        }
    }

    /// Builds a candidate from a local file, declaring its mime type from the extension.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .map(MediaKind::mime_for_extension)
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Self {
            name,
            mime_type,
            handle: MediaHandle::from_path(path),
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime_type)
    }

    pub fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }
}

/// Persisted reference record. Field order and names are the stored schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMedia {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub handle: MediaHandle,
    pub display_name: String,
    /// Width / height reported by the render surface once known.
    pub aspect_ratio: Option<f32>,
}

impl MediaItem {
    pub fn new(handle: MediaHandle, display_name: impl Into<String>) -> Self {
        Self {
            handle,
            display_name: display_name.into(),
            aspect_ratio: None,
        }
    }

    /// Stable identity: the handle string.
    pub fn id(&self) -> &str {
        self.handle.as_str()
    }

    pub fn to_stored(&self) -> StoredMedia {
        StoredMedia {
            name: self.display_name.clone(),
            url: self.handle.as_str().to_string(),
        }
    }

    pub fn from_stored(record: StoredMedia) -> Self {
        Self::new(MediaHandle::new(record.url), record.name)
    }

    /// Display name shortened to `max_len` characters, keeping the extension.
    pub fn short_label(&self, max_len: usize) -> String {
        truncate_filename(&self.display_name, max_len)
    }
}

impl From<MediaCandidate> for MediaItem {
    fn from(candidate: MediaCandidate) -> Self {
        Self::new(candidate.handle, candidate.name)
    }
}

/// Shortens `name` to `<stem prefix>...<ext>` when longer than `max_len` chars.
pub fn truncate_filename(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len <= max_len {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(dot) => (&name[..dot], &name[dot + 1..]),
        None => (name, ""),
    };
    let keep = max_len.saturating_sub(3 + ext.chars().count());
    let prefix: String = stem.chars().take(keep).collect();
    format!("{prefix}...{ext}")
}
