//! Gallery configuration.
//!
//! There is no config file: every value has a default matching the stock
//! gallery, and the store location can be moved with `VIDGAL_STORE`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Environment variable overriding the store location.
pub const STORE_ENV: &str = "VIDGAL_STORE";

/// Viewport breakpoints for the adaptive masonry column count.
///
/// Each `(max_width, columns)` pair applies when the viewport is at most
/// `max_width` pixels wide; the narrowest matching breakpoint wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    pub default_columns: u8,
    pub steps: Vec<(f32, u8)>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            default_columns: 4,
            steps: vec![(1100.0, 3), (700.0, 2), (500.0, 1)],
        }
    }
}

impl Breakpoints {
    /// Column count for a viewport width.
    pub fn columns_for(&self, viewport_width: f32) -> u8 {
        self.steps
            .iter()
            .filter(|(max_width, _)| viewport_width <= *max_width)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, columns)| *columns)
            .unwrap_or(self.default_columns)
            .max(1)
    }
}

/// Sizing constants consumed by the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub breakpoints: Breakpoints,
    /// Circle diameter in pixels before the random size factor (default: 400)
    pub circle_base_diameter: f32,
    /// Horizontal distance between slideshow thumbnails in pixels (default: 210)
    pub thumbnail_stride: f32,
    /// Longest label before truncation (default: 20)
    pub label_max_len: usize,
    /// Split-screen column count when no override is set (default: 2)
    pub default_split_columns: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            circle_base_diameter: 400.0,
            thumbnail_stride: 210.0,
            label_max_len: 20,
            default_split_columns: 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryConfig {
    pub layout: LayoutConfig,
    /// Explicit store path; `None` uses the XDG location.
    pub store_path: Option<PathBuf>,
}

impl GalleryConfig {
    /// Defaults plus the `VIDGAL_STORE` override.
    pub fn from_env() -> Self {
        Self {
            layout: LayoutConfig::default(),
            store_path: std::env::var_os(STORE_ENV).map(PathBuf::from),
        }
    }

    /// Resolves where the reference store lives.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_store_path(),
        }
    }

    /// `XDG_CONFIG_HOME/vidgal/gallery.sqlite`
    pub fn default_store_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "vidgal")
            .context("Failed to determine project directories")?;

        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;

        Ok(config_dir.join("gallery.sqlite"))
    }
}
