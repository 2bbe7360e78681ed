//! Projection of the gallery list onto a layout.
//!
//! `LayoutEngine::project` is a pure function of its arguments: it never sees
//! `GalleryState` or playback state. The only non-determinism is the circle
//! layout's size factor, drawn per item on every projection.

use rand::Rng;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::layout::layout_cache::LayoutCache;
use crate::layout::masonry::MasonryLayout;
use crate::layout::render_plan::{
    CircleEntry, CirclePlan, PlanEntry, RenderPlan, SlideshowPlan, SplitScreenPlan, Thumbnail,
    EMPTY_SLIDESHOW_MESSAGE, REMOVE_CONTROL_LABEL,
};
use crate::layout::{ColumnOverrides, LayoutMode};
use crate::models::MediaItem;

/// Size factor range for circle entries.
pub const CIRCLE_SIZE_RANGE: std::ops::Range<f32> = 0.5..1.5;

/// Everything a projection depends on besides items, mode and focus.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub viewport_width: f32,
    pub columns: ColumnOverrides,
    pub config: LayoutConfig,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            columns: ColumnOverrides::default(),
            config: LayoutConfig::default(),
        }
    }
}

impl LayoutParams {
    /// Masonry column count for `mode`: the override, or the breakpoint count.
    pub fn masonry_columns(&self, mode: LayoutMode) -> (usize, bool) {
        match self.columns.get(mode) {
            Some(n) if n > 0 => (n as usize, false),
            _ => (
                self.config.breakpoints.columns_for(self.viewport_width) as usize,
                true,
            ),
        }
    }

    /// Split-screen column count; never adaptive, never zero.
    pub fn split_columns(&self) -> usize {
        match self.columns.split_screen {
            0 => self.config.default_split_columns.max(1) as usize,
            n => n as usize,
        }
    }
}

/// Clamps a possibly stale focus into `[0, len)`; `0` for an empty list.
pub fn clamp_focus(focused: usize, len: usize) -> usize {
    focused.min(len.saturating_sub(1))
}

#[derive(Default)]
pub struct LayoutEngine {
    masonry: MasonryLayout,
    cache: LayoutCache,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_masonry(masonry: MasonryLayout) -> Self {
        Self {
            masonry,
            cache: LayoutCache::new(),
        }
    }

    /// Projects `items` under `mode`.
    pub fn project(
        &self,
        items: &[MediaItem],
        mode: LayoutMode,
        params: &LayoutParams,
        focused: usize,
    ) -> RenderPlan {
        self.project_with_rng(items, mode, params, focused, &mut rand::thread_rng())
    }

    /// Same as [`project`](Self::project) with the circle sizes drawn from `rng`.
    pub fn project_with_rng<R: Rng>(
        &self,
        items: &[MediaItem],
        mode: LayoutMode,
        params: &LayoutParams,
        focused: usize,
        rng: &mut R,
    ) -> RenderPlan {
        let focused = clamp_focus(focused, items.len());
        let label_len = params.config.label_max_len;
        let entry = |index: usize, item: &MediaItem| PlanEntry {
            index,
            handle: item.handle.clone(),
            label: item.short_label(label_len),
            control_label: REMOVE_CONTROL_LABEL,
        };

        let plan = match mode {
            LayoutMode::Grid | LayoutMode::StackedPolaroids => {
                let (columns, adaptive) = params.masonry_columns(mode);
                let assignment = self.masonry_assignment(items, columns);
                RenderPlan::Masonry(self.masonry.build(
                    items,
                    &assignment,
                    params.viewport_width,
                    mode,
                    adaptive,
                    entry,
                ))
            }
            LayoutMode::SplitScreen => {
                let count = params.split_columns();
                let mut columns = vec![Vec::new(); count];
                for (index, item) in items.iter().enumerate() {
                    columns[index % count].push(entry(index, item));
                }
                RenderPlan::SplitScreen(SplitScreenPlan { columns })
            }
            LayoutMode::Slideshow => match items.get(focused) {
                None => RenderPlan::EmptySlideshow {
                    message: EMPTY_SLIDESHOW_MESSAGE,
                },
                Some(current) => {
                    let stride = params.config.thumbnail_stride;
                    let thumbnails = items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| Thumbnail {
                            entry: entry(index, item),
                            active: index == focused,
                        })
                        .collect();
                    RenderPlan::Slideshow(SlideshowPlan {
                        focused: entry(focused, current),
                        thumbnails,
                        strip_shift: -(focused as f32 * stride) - stride / 2.0,
                    })
                }
            },
            LayoutMode::Circle => {
                let base = params.config.circle_base_diameter;
                let entries = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let size_factor = rng.gen_range(CIRCLE_SIZE_RANGE);
                        CircleEntry {
                            entry: entry(index, item),
                            size_factor,
                            diameter: base * size_factor,
                        }
                    })
                    .collect();
                RenderPlan::Circle(CirclePlan {
                    base_diameter: base,
                    entries,
                })
            }
        };

        debug!(
            "Projected {} items as {} ({} mounted)",
            items.len(),
            mode,
            plan.mounted_entries().len()
        );
        plan
    }

    /// Drops memoised masonry assignments.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    fn masonry_assignment(&self, items: &[MediaItem], columns: usize) -> Vec<Vec<usize>> {
        let list_hash = LayoutCache::compute_list_hash(items);
        if let Some(assignment) = self.cache.get(columns, list_hash, items.len()) {
            return assignment;
        }

        let assignment = self.masonry.assign(items, columns);
        self.cache
            .set(columns, list_hash, assignment.clone(), items.len());
        assignment
    }
}
