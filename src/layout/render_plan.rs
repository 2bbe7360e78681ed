use crate::layout::LayoutMode;
use crate::models::MediaHandle;

/// Accessible label of the one control every item carries.
pub const REMOVE_CONTROL_LABEL: &str = "Remove video";

/// Shown by the slideshow when there is nothing to play.
pub const EMPTY_SLIDESHOW_MESSAGE: &str =
    "No videos to display. Add some videos to start the slideshow!";

/// One gallery item as placed by a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    /// Position in the gallery list; the index remove requests refer to.
    pub index: usize,
    pub handle: MediaHandle,
    pub label: String,
    pub control_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasonryTile {
    pub entry: PlanEntry,
    pub top: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MasonryColumn {
    pub tiles: Vec<MasonryTile>,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasonryPlan {
    /// `Grid` or `StackedPolaroids`.
    pub mode: LayoutMode,
    /// True when the column count came from the viewport breakpoints.
    pub adaptive: bool,
    pub column_width: f32,
    pub columns: Vec<MasonryColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitScreenPlan {
    pub columns: Vec<Vec<PlanEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub entry: PlanEntry,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowPlan {
    pub focused: PlanEntry,
    pub thumbnails: Vec<Thumbnail>,
    /// Horizontal strip translation in pixels, relative to the container centre.
    pub strip_shift: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleEntry {
    pub entry: PlanEntry,
    /// Drawn from `[0.5, 1.5)`.
    pub size_factor: f32,
    pub diameter: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CirclePlan {
    pub base_diameter: f32,
    pub entries: Vec<CircleEntry>,
}

/// Structural description of how items map onto a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    Masonry(MasonryPlan),
    SplitScreen(SplitScreenPlan),
    Slideshow(SlideshowPlan),
    /// Slideshow with nothing to show.
    EmptySlideshow { message: &'static str },
    Circle(CirclePlan),
}

impl RenderPlan {
    pub fn mode(&self) -> LayoutMode {
        match self {
            RenderPlan::Masonry(plan) => plan.mode,
            RenderPlan::SplitScreen(_) => LayoutMode::SplitScreen,
            RenderPlan::Slideshow(_) | RenderPlan::EmptySlideshow { .. } => LayoutMode::Slideshow,
            RenderPlan::Circle(_) => LayoutMode::Circle,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, RenderPlan::EmptySlideshow { .. })
    }

    /// Entries that get a playable media element, in plan order.
    ///
    /// Slideshow thumbnails are previews and do not count.
    pub fn mounted_entries(&self) -> Vec<&PlanEntry> {
        match self {
            RenderPlan::Masonry(plan) => plan
                .columns
                .iter()
                .flat_map(|c| c.tiles.iter().map(|t| &t.entry))
                .collect(),
            RenderPlan::SplitScreen(plan) => plan.columns.iter().flatten().collect(),
            RenderPlan::Slideshow(plan) => vec![&plan.focused],
            RenderPlan::EmptySlideshow { .. } => Vec::new(),
            RenderPlan::Circle(plan) => plan.entries.iter().map(|e| &e.entry).collect(),
        }
    }

    pub fn mounted_handles(&self) -> Vec<MediaHandle> {
        self.mounted_entries()
            .into_iter()
            .map(|e| e.handle.clone())
            .collect()
    }

    /// Number of column groups; `None` for layouts without columns.
    pub fn column_count(&self) -> Option<usize> {
        match self {
            RenderPlan::Masonry(plan) => Some(plan.columns.len()),
            RenderPlan::SplitScreen(plan) => Some(plan.columns.len()),
            _ => None,
        }
    }
}
