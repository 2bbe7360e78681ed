use crate::layout::render_plan::{MasonryColumn, MasonryPlan, MasonryTile, PlanEntry};
use crate::layout::LayoutMode;
use crate::models::MediaItem;

/// Configuration for the balanced masonry layout.
///
/// Columns share one width; each tile's height follows its aspect ratio and
/// every item drops into the column that is currently shortest.
#[derive(Debug, Clone)]
pub struct MasonryLayout {
    /// Gap between columns and between stacked tiles in pixels (default: 0)
    pub gap: f32,
    /// Aspect ratio assumed until the surface reports one (default: 16:9)
    pub fallback_aspect: f32,
}

impl Default for MasonryLayout {
    fn default() -> Self {
        Self {
            gap: 0.0,
            fallback_aspect: 16.0 / 9.0,
        }
    }
}

impl MasonryLayout {
    /// Creates a new MasonryLayout with custom parameters.
    #[cfg(test)]
    pub fn new(gap: f32, fallback_aspect: f32) -> Self {
        Self {
            gap,
            fallback_aspect,
        }
    }

    fn tile_aspect(&self, item: &MediaItem) -> f32 {
        match item.aspect_ratio {
            // Some containers report junk dimensions; keep those tiles at the fallback.
            Some(ar) if (0.2..=5.0).contains(&ar) => ar,
            _ => self.fallback_aspect,
        }
    }

    pub fn column_width(&self, viewport_width: f32, columns: usize) -> f32 {
        let columns = columns.max(1) as f32;
        ((viewport_width - self.gap * (columns - 1.0)) / columns).max(1.0)
    }

    /// Assigns item indices to `columns` columns by running height balance.
    ///
    /// Heights are relative to a unit column width, so the assignment does not
    /// depend on the viewport; gaps are left out. Ties go to the leftmost column.
    pub fn assign(&self, items: &[MediaItem], columns: usize) -> Vec<Vec<usize>> {
        let columns = columns.max(1);
        let mut assignment = vec![Vec::new(); columns];
        let mut heights = vec![0.0f32; columns];

        for (index, item) in items.iter().enumerate() {
            let shortest = heights
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(b.1))
                .map(|(c, _)| c)
                .unwrap_or(0);

            heights[shortest] += 1.0 / self.tile_aspect(item);
            assignment[shortest].push(index);
        }

        assignment
    }

    /// Places an assignment at a concrete column width.
    pub fn build(
        &self,
        items: &[MediaItem],
        assignment: &[Vec<usize>],
        viewport_width: f32,
        mode: LayoutMode,
        adaptive: bool,
        label: impl Fn(usize, &MediaItem) -> PlanEntry,
    ) -> MasonryPlan {
        let column_width = self.column_width(viewport_width, assignment.len());

        let columns = assignment
            .iter()
            .map(|indices| {
                let mut column = MasonryColumn::default();
                for &index in indices {
                    let item = &items[index];
                    if !column.tiles.is_empty() {
                        column.height += self.gap;
                    }
                    let height = (column_width / self.tile_aspect(item)).max(1.0);
                    column.tiles.push(MasonryTile {
                        entry: label(index, item),
                        top: column.height,
                        height,
                    });
                    column.height += height;
                }
                column
            })
            .collect();

        MasonryPlan {
            mode,
            adaptive,
            column_width,
            columns,
        }
    }
}
