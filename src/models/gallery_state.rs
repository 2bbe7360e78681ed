//! The authoritative gallery list and its view parameters.
//!
//! `GalleryState` is the only place items, layout mode, column overrides and
//! focus change. Every mutation of the item list is written through to the
//! reference store.

use tracing::{debug, info, warn};

use crate::error::{GalleryError, Result};
use crate::layout::{ColumnOverrides, LayoutMode, MAX_COLUMNS};
use crate::models::media_store::{hydrate_items, MediaPersistence};
use crate::models::{MediaCandidate, MediaItem, StoredMedia};

pub struct GalleryState {
    items: Vec<MediaItem>,
    layout_mode: LayoutMode,
    columns: ColumnOverrides,
    focused_index: usize,
    drop_zone_expanded: bool,
    store: Box<dyn MediaPersistence>,
}

impl std::fmt::Debug for GalleryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryState")
            .field("items", &self.items.len())
            .field("layout_mode", &self.layout_mode)
            .field("columns", &self.columns)
            .field("focused_index", &self.focused_index)
            .field("drop_zone_expanded", &self.drop_zone_expanded)
            .field("store", &"<dyn MediaPersistence>")
            .finish()
    }
}

impl GalleryState {
    /// Creates the session state from whatever `store` holds.
    pub fn hydrate(store: Box<dyn MediaPersistence>) -> Self {
        let items = hydrate_items(store.as_ref());
        info!("Gallery hydrated with {} items", items.len());

        Self {
            drop_zone_expanded: items.is_empty(),
            items,
            layout_mode: LayoutMode::default(),
            columns: ColumnOverrides::default(),
            focused_index: 0,
            store,
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn column_overrides(&self) -> ColumnOverrides {
        self.columns
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn focused_item(&self) -> Option<&MediaItem> {
        self.items.get(self.focused_index)
    }

    pub fn drop_zone_expanded(&self) -> bool {
        self.drop_zone_expanded
    }

    /// Appends every video candidate, skipping the rest. Returns how many were added.
    pub fn add_items<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = MediaCandidate>,
    {
        let was_empty = self.items.is_empty();
        let mut added = 0;

        for candidate in candidates {
            if !candidate.is_video() {
                let skipped = GalleryError::InvalidInput {
                    name: candidate.name,
                    mime_type: candidate.mime_type,
                };
                debug!("Skipping candidate: {}", skipped);
                continue;
            }
            self.items.push(MediaItem::from(candidate));
            added += 1;
        }

        if added > 0 {
            if was_empty {
                self.focused_index = 0;
            }
            self.drop_zone_expanded = false;
        }

        self.persist();
        debug!("Added {} items ({} total)", added, self.items.len());
        added
    }

    /// Removes the item at `index`, keeping focus on a valid neighbour.
    pub fn remove_item(&mut self, index: usize) -> Result<MediaItem> {
        if index >= self.items.len() {
            return Err(GalleryError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        self.persist();

        if self.items.is_empty() {
            self.focused_index = 0;
            self.drop_zone_expanded = true;
        } else if index <= self.focused_index && self.focused_index > 0 {
            self.focused_index -= 1;
        }
        self.focused_index = self.clamped(self.focused_index);

        debug!("Removed {:?} at {}", removed.display_name, index);
        Ok(removed)
    }

    /// Switches layout and returns the previous mode.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> LayoutMode {
        let previous = std::mem::replace(&mut self.layout_mode, mode);
        if previous != mode {
            debug!("Layout mode {} -> {}", previous, mode);
        }
        previous
    }

    /// Sets the column count of `mode`. Returns whether anything was stored.
    pub fn set_column_override(&mut self, mode: LayoutMode, columns: u8) -> bool {
        if columns > MAX_COLUMNS {
            debug!("Ignoring column override {} for {}", columns, mode);
            return false;
        }
        let stored = self.columns.set(mode, columns);
        if stored {
            debug!("Column override for {} set to {}", mode, columns);
        }
        stored
    }

    /// Moves focus by `delta`, wrapping around both ends.
    pub fn move_focus(&mut self, delta: i64) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as i64;
        self.focused_index = (self.focused_index as i64 + delta).rem_euclid(len) as usize;
    }

    /// Focuses `index`, clamped into the list. Returns the focus actually set.
    pub fn set_focused_index(&mut self, index: usize) -> usize {
        self.focused_index = self.clamped(index);
        self.focused_index
    }

    /// Expands or collapses the drop zone; it stays expanded while empty.
    pub fn toggle_drop_zone(&mut self) {
        if !self.items.is_empty() {
            self.drop_zone_expanded = !self.drop_zone_expanded;
        }
    }

    /// Records the aspect ratio the surface measured for `handle`.
    pub fn set_aspect_ratio(&mut self, handle: &crate::models::MediaHandle, ratio: f32) {
        for item in self.items.iter_mut().filter(|i| &i.handle == handle) {
            item.aspect_ratio = Some(ratio);
        }
    }

    /// The list in its persisted form.
    pub fn records(&self) -> Vec<StoredMedia> {
        self.items.iter().map(MediaItem::to_stored).collect()
    }

    fn clamped(&self, index: usize) -> usize {
        index.min(self.items.len().saturating_sub(1))
    }

    fn persist(&mut self) {
        let records = self.records();
        if let Err(e) = self.store.save(&records) {
            warn!("Failed to persist gallery: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media_store::{MemoryStore, GALLERY_KEY};
    use crate::models::{MediaHandle, MediaReferenceStore};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn video(name: &str) -> MediaCandidate {
        MediaCandidate::new(name, "video/mp4", MediaHandle::new(format!("blob:{name}")))
    }

    fn names(state: &GalleryState) -> Vec<&str> {
        state.items().iter().map(|i| i.display_name.as_str()).collect()
    }

    fn empty_state() -> GalleryState {
        GalleryState::hydrate(Box::new(MemoryStore::new()))
    }

    /// Store whose contents stay visible to the test after the state takes ownership.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl MediaPersistence for SharedStore {
        fn load(&self) -> Result<Option<Vec<StoredMedia>>> {
            self.0.borrow().load()
        }

        fn save(&mut self, records: &[StoredMedia]) -> Result<()> {
            self.0.borrow_mut().save(records)
        }
    }

    #[test]
    fn test_hydrate_from_store() {
        let mut store = MemoryStore::new();
        store
            .save(&[
                StoredMedia {
                    name: "a.mp4".into(),
                    url: "blob:a".into(),
                },
                StoredMedia {
                    name: "b.mp4".into(),
                    url: "blob:b".into(),
                },
            ])
            .unwrap();

        let state = GalleryState::hydrate(Box::new(store));
        assert_eq!(names(&state), vec!["a.mp4", "b.mp4"]);
        assert!(!state.drop_zone_expanded());
        assert_eq!(state.layout_mode(), LayoutMode::Grid);
    }

    #[test]
    fn test_hydrate_malformed_is_empty() {
        let state = GalleryState::hydrate(Box::new(MemoryStore::with_raw("nope")));
        assert!(state.is_empty());
        assert!(state.drop_zone_expanded());
    }

    #[test]
    fn test_add_skips_non_video() {
        let mut state = empty_state();
        let added = state.add_items(vec![
            video("a.mp4"),
            MediaCandidate::new("cover.png", "image/png", MediaHandle::new("blob:png")),
            MediaCandidate::new("notes.txt", "", MediaHandle::new("blob:txt")),
            video("b.mp4"),
        ]);

        assert_eq!(added, 2);
        assert_eq!(names(&state), vec!["a.mp4", "b.mp4"]);
        assert_eq!(state.focused_index(), 0);
        assert!(!state.drop_zone_expanded());
    }

    #[test]
    fn test_add_keeps_focus() {
        let mut state = empty_state();
        state.add_items(vec![video("a"), video("b"), video("c")]);
        state.set_focused_index(2);
        state.add_items(vec![video("d")]);
        assert_eq!(state.focused_index(), 2);
    }

    #[test]
    fn test_add_and_remove_persist() {
        let shared = SharedStore::default();
        let mut state = GalleryState::hydrate(Box::new(shared.clone()));

        state.add_items(vec![video("a.mp4"), video("b.mp4")]);
        assert_eq!(shared.load().unwrap().unwrap().len(), 2);

        state.remove_item(0).unwrap();
        let stored = shared.load().unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "b.mp4");
    }

    #[test]
    fn test_persists_through_sqlite_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.sqlite");

        {
            let store = MediaReferenceStore::open(&path).unwrap();
            let mut state = GalleryState::hydrate(Box::new(store));
            state.add_items(vec![video("one.mp4"), video("two.mp4")]);
        }

        let store = MediaReferenceStore::open(&path).unwrap();
        assert!(store.get_raw(GALLERY_KEY).unwrap().is_some());
        let state = GalleryState::hydrate(Box::new(store));
        assert_eq!(names(&state), vec!["one.mp4", "two.mp4"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut state = empty_state();
        assert!(matches!(
            state.remove_item(0),
            Err(GalleryError::IndexOutOfRange { index: 0, len: 0 })
        ));

        state.add_items(vec![video("a")]);
        assert!(matches!(
            state.remove_item(1),
            Err(GalleryError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_remove_adjusts_focus() {
        let mut state = empty_state();
        state.add_items(vec![video("a"), video("b"), video("c"), video("d")]);

        state.set_focused_index(2);
        state.remove_item(3).unwrap();
        assert_eq!(state.focused_index(), 2);

        state.remove_item(2).unwrap();
        assert_eq!(state.focused_index(), 1);

        state.remove_item(0).unwrap();
        assert_eq!(state.focused_index(), 0);
        assert_eq!(names(&state), vec!["b"]);

        state.remove_item(0).unwrap();
        assert_eq!(state.focused_index(), 0);
        assert!(state.drop_zone_expanded());
    }

    #[test]
    fn test_remove_keeps_focus_at_zero() {
        let mut state = empty_state();
        state.add_items(vec![video("a"), video("b")]);
        state.remove_item(0).unwrap();
        assert_eq!(state.focused_index(), 0);
        assert_eq!(state.focused_item().unwrap().display_name, "b");
    }

    #[test]
    fn test_duplicates_are_distinct_items() {
        let mut state = empty_state();
        state.add_items(vec![video("a"), video("a"), video("b")]);
        assert_eq!(state.len(), 3);

        state.remove_item(1).unwrap();
        assert_eq!(names(&state), vec!["a", "b"]);
    }

    #[test]
    fn test_move_focus_wraps() {
        let mut state = empty_state();
        state.move_focus(1);
        assert_eq!(state.focused_index(), 0);

        state.add_items(vec![video("a"), video("b"), video("c")]);
        state.move_focus(-1);
        assert_eq!(state.focused_index(), 2);
        state.move_focus(1);
        assert_eq!(state.focused_index(), 0);
        state.move_focus(7);
        assert_eq!(state.focused_index(), 1);
    }

    #[test]
    fn test_set_focused_index_clamps() {
        let mut state = empty_state();
        assert_eq!(state.set_focused_index(5), 0);
        state.add_items(vec![video("a"), video("b")]);
        assert_eq!(state.set_focused_index(5), 1);
    }

    #[test]
    fn test_column_overrides() {
        let mut state = empty_state();
        assert!(state.set_column_override(LayoutMode::Grid, 3));
        assert!(state.set_column_override(LayoutMode::SplitScreen, 4));
        assert!(!state.set_column_override(LayoutMode::Circle, 2));
        assert!(!state.set_column_override(LayoutMode::Grid, 5));

        state.set_layout_mode(LayoutMode::SplitScreen);
        let columns = state.column_overrides();
        assert_eq!(columns.grid, 3);
        assert_eq!(columns.split_screen, 4);
        assert_eq!(columns.stacked, 0);
    }

    #[test]
    fn test_set_layout_mode_returns_previous() {
        let mut state = empty_state();
        assert_eq!(state.set_layout_mode(LayoutMode::Slideshow), LayoutMode::Grid);
        assert_eq!(state.set_layout_mode(LayoutMode::Circle), LayoutMode::Slideshow);
        assert_eq!(state.layout_mode(), LayoutMode::Circle);
    }

    #[test]
    fn test_drop_zone_toggle() {
        let mut state = empty_state();
        state.toggle_drop_zone();
        assert!(state.drop_zone_expanded());

        state.add_items(vec![video("a")]);
        assert!(!state.drop_zone_expanded());
        state.toggle_drop_zone();
        assert!(state.drop_zone_expanded());
    }

    #[test]
    fn test_set_aspect_ratio_by_handle() {
        let mut state = empty_state();
        state.add_items(vec![video("a"), video("b"), video("a")]);
        state.set_aspect_ratio(&MediaHandle::new("blob:a"), 0.5);

        let ratios: Vec<Option<f32>> = state.items().iter().map(|i| i.aspect_ratio).collect();
        assert_eq!(ratios, vec![Some(0.5), None, Some(0.5)]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
        Focus(usize),
        Move(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..4).prop_map(Op::Add),
            (0usize..8).prop_map(Op::Remove),
            (0usize..8).prop_map(Op::Focus),
            (-5i64..5).prop_map(Op::Move),
        ]
    }

    proptest! {
        #[test]
        fn focus_stays_in_range(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut state = empty_state();
            let mut next = 0usize;

            for op in ops {
                match op {
                    Op::Add(n) => {
                        let batch: Vec<MediaCandidate> = (0..n)
                            .map(|_| {
                                next += 1;
                                video(&format!("v{next}"))
                            })
                            .collect();
                        state.add_items(batch);
                    }
                    Op::Remove(i) => {
                        let _ = state.remove_item(i);
                    }
                    Op::Focus(i) => {
                        state.set_focused_index(i);
                    }
                    Op::Move(d) => state.move_focus(d),
                }

                if state.is_empty() {
                    prop_assert_eq!(state.focused_index(), 0);
                } else {
                    prop_assert!(state.focused_index() < state.len());
                }
            }
        }

        #[test]
        fn remove_preserves_order(count in 1usize..12, pick in 0usize..12) {
            let mut state = empty_state();
            state.add_items((0..count).map(|i| video(&format!("v{i}"))));
            let index = pick % count;

            let before: Vec<String> = state.items().iter().map(|i| i.display_name.clone()).collect();
            state.remove_item(index).unwrap();
            let after: Vec<String> = state.items().iter().map(|i| i.display_name.clone()).collect();

            let mut expected = before;
            expected.remove(index);
            prop_assert_eq!(after, expected);
        }
    }
}
