//! Client-side video gallery engine.
//!
//! Holds an ordered list of video references, persists it, projects it onto
//! one of several layouts and keeps playback state intact when the layout
//! changes. Rendering is left to a [`RenderSurface`].

pub mod app;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod ui;
pub mod video;

pub use app::{mount_gallery, GallerySession, MountedGallery};
pub use config::{GalleryConfig, LayoutConfig};
pub use error::{GalleryError, Result};
pub use layout::{LayoutEngine, LayoutMode, LayoutParams, RenderPlan};
pub use models::{
    GalleryState, MediaCandidate, MediaHandle, MediaItem, MediaPersistence, MediaReferenceStore,
    MemoryStore,
};
pub use ui::{HeadlessSurface, RenderSurface};
