use std::fmt;

/// Layout strategy the gallery is projected through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutMode {
    /// Masonry grid, columns balanced by height.
    #[default]
    Grid,
    SplitScreen,
    Slideshow,
    Circle,
    /// Masonry variant with its own column override.
    StackedPolaroids,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 5] = [
        LayoutMode::Grid,
        LayoutMode::SplitScreen,
        LayoutMode::Slideshow,
        LayoutMode::Circle,
        LayoutMode::StackedPolaroids,
    ];

    /// Whether the mode honours a user column override.
    pub fn supports_columns(self) -> bool {
        matches!(
            self,
            LayoutMode::Grid | LayoutMode::SplitScreen | LayoutMode::StackedPolaroids
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            LayoutMode::Grid => "Masonry",
            LayoutMode::SplitScreen => "Split Screen",
            LayoutMode::Slideshow => "Slideshow",
            LayoutMode::Circle => "Circle",
            LayoutMode::StackedPolaroids => "Stacked Polaroids",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Largest column count a user can pick.
pub const MAX_COLUMNS: u8 = 4;

/// Per-mode column overrides. `0` means adaptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub grid: u8,
    pub split_screen: u8,
    pub stacked: u8,
}

impl Default for ColumnOverrides {
    fn default() -> Self {
        Self {
            grid: 0,
            split_screen: 2,
            stacked: 0,
        }
    }
}

impl ColumnOverrides {
    pub fn get(&self, mode: LayoutMode) -> Option<u8> {
        match mode {
            LayoutMode::Grid => Some(self.grid),
            LayoutMode::SplitScreen => Some(self.split_screen),
            LayoutMode::StackedPolaroids => Some(self.stacked),
            LayoutMode::Slideshow | LayoutMode::Circle => None,
        }
    }

    /// Stores `columns` for `mode`. Returns false for modes without columns.
    pub fn set(&mut self, mode: LayoutMode, columns: u8) -> bool {
        let slot = match mode {
            LayoutMode::Grid => &mut self.grid,
            LayoutMode::SplitScreen => &mut self.split_screen,
            LayoutMode::StackedPolaroids => &mut self.stacked,
            LayoutMode::Slideshow | LayoutMode::Circle => return false,
        };
        *slot = columns;
        true
    }
}
