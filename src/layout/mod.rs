//! Projection of the gallery onto its layouts.
//!
//! - `LayoutEngine` - turns (items, mode, params, focus) into a `RenderPlan`
//! - `MasonryLayout` - height-balanced columns for the grid modes
//! - `LayoutCache` - memoised masonry column assignments

pub mod engine;
pub mod layout_cache;
pub mod masonry;
pub mod mode;
pub mod render_plan;

pub use engine::{clamp_focus, LayoutEngine, LayoutParams};
pub use layout_cache::LayoutCache;
pub use masonry::MasonryLayout;
pub use mode::{ColumnOverrides, LayoutMode, MAX_COLUMNS};
pub use render_plan::*;
