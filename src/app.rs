//! A running gallery: state, layout engine and render surface wired together.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::{LayoutEngine, LayoutMode, LayoutParams, RenderPlan};
use crate::models::{GalleryState, MediaCandidate, MediaHandle, MediaItem};
use crate::ui::keybindings::{GalleryCommand, InputRouter, KeyboardSurface, ListenerGuard};
use crate::ui::surface::RenderSurface;
use crate::video::{begin_layout_transition, complete_layout_transition, RestoreReport};

/// Owns the gallery state and re-presents the surface after every change.
pub struct GallerySession<S: RenderSurface> {
    state: GalleryState,
    engine: LayoutEngine,
    params: LayoutParams,
    surface: S,
    plan: Option<RenderPlan>,
}

impl<S: RenderSurface> GallerySession<S> {
    pub fn new(state: GalleryState, config: LayoutConfig, surface: S) -> Self {
        let params = LayoutParams {
            columns: state.column_overrides(),
            config,
            ..LayoutParams::default()
        };

        Self {
            state,
            engine: LayoutEngine::new(),
            params,
            surface,
            plan: None,
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// The plan last handed to the surface.
    pub fn plan(&self) -> Option<&RenderPlan> {
        self.plan.as_ref()
    }

    /// Projects the current state and presents it.
    pub fn render(&mut self) -> &RenderPlan {
        self.params.columns = self.state.column_overrides();
        let plan = self.engine.project(
            self.state.items(),
            self.state.layout_mode(),
            &self.params,
            self.state.focused_index(),
        );
        self.surface.present(&plan);
        self.plan.insert(plan)
    }

    pub fn add_candidates<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = MediaCandidate>,
    {
        let added = self.state.add_items(candidates);
        if added > 0 {
            self.render();
        }
        added
    }

    /// Adds files from disk, keeping only videos.
    pub fn add_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        self.add_candidates(paths.iter().map(|p| MediaCandidate::from_path(p.as_ref())))
    }

    pub fn remove_item(&mut self, index: usize) -> Result<MediaItem> {
        let removed = self.state.remove_item(index)?;
        self.render();
        Ok(removed)
    }

    /// Switches layout, carrying play state and position across the remount.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> RestoreReport {
        let previous = self.state.layout_mode();
        if previous == mode {
            return RestoreReport::default();
        }

        let transition = begin_layout_transition(self.surface.registry(), previous, mode);
        self.state.set_layout_mode(mode);
        self.render();
        let report = complete_layout_transition(transition, self.surface.registry_mut());

        info!(
            "Switched to {} ({} restored, {} resume failures)",
            mode,
            report.restored,
            report.resume_failures.len()
        );
        report
    }

    pub fn set_column_override(&mut self, mode: LayoutMode, columns: u8) -> bool {
        let stored = self.state.set_column_override(mode, columns);
        if stored && mode == self.state.layout_mode() {
            self.render();
        }
        stored
    }

    pub fn move_focus(&mut self, delta: i64) {
        self.state.move_focus(delta);
        self.render_if(LayoutMode::Slideshow);
    }

    pub fn set_focused_index(&mut self, index: usize) -> usize {
        let focused = self.state.set_focused_index(index);
        self.render_if(LayoutMode::Slideshow);
        focused
    }

    pub fn toggle_drop_zone(&mut self) {
        self.state.toggle_drop_zone();
    }

    /// Plays or pauses the mounted element for `handle`; a no-op when unmounted.
    pub fn toggle_playback(&mut self, handle: &MediaHandle) -> Result<()> {
        match self.surface.registry_mut().get_mut(handle) {
            Some(element) => element.toggle(),
            None => {
                debug!("No mounted element for {}", handle);
                Ok(())
            }
        }
    }

    /// Records a measured aspect ratio and re-lays out the masonry modes.
    pub fn set_aspect_ratio(&mut self, handle: &MediaHandle, ratio: f32) {
        self.state.set_aspect_ratio(handle, ratio);
        self.render_if_masonry();
    }

    pub fn resize(&mut self, viewport_width: f32) {
        if self.params.viewport_width == viewport_width {
            return;
        }
        self.params.viewport_width = viewport_width;
        self.render_if_masonry();
    }

    pub fn apply(&mut self, command: GalleryCommand) -> Result<()> {
        debug!("Applying {:?}", command);
        match command {
            GalleryCommand::SetColumnOverride { mode, columns } => {
                self.set_column_override(mode, columns);
            }
            GalleryCommand::MoveFocus(delta) => self.move_focus(delta),
            GalleryCommand::FocusIndex(index) => {
                self.set_focused_index(index);
            }
            GalleryCommand::RemoveItem(index) => {
                self.remove_item(index)?;
            }
            GalleryCommand::TogglePlayback(handle) => self.toggle_playback(&handle)?,
            GalleryCommand::ToggleDropZone => self.toggle_drop_zone(),
        }
        Ok(())
    }

    fn render_if(&mut self, mode: LayoutMode) {
        if self.state.layout_mode() == mode {
            self.render();
        }
    }

    fn render_if_masonry(&mut self) {
        if matches!(
            self.state.layout_mode(),
            LayoutMode::Grid | LayoutMode::StackedPolaroids
        ) {
            self.render();
        }
    }
}

/// A session attached to a keyboard. Dropping it detaches the key listener.
pub struct MountedGallery<S: RenderSurface> {
    session: Rc<RefCell<GallerySession<S>>>,
    _listener: ListenerGuard,
}

impl<S: RenderSurface> MountedGallery<S> {
    pub fn session(&self) -> &Rc<RefCell<GallerySession<S>>> {
        &self.session
    }
}

/// Presents the session and routes `keyboard` input to it while mounted.
pub fn mount_gallery<S: RenderSurface + 'static>(
    session: Rc<RefCell<GallerySession<S>>>,
    keyboard: &KeyboardSurface,
) -> MountedGallery<S> {
    session.borrow_mut().render();

    let weak = Rc::downgrade(&session);
    let listener = keyboard.subscribe(move |key| {
        let Some(shared) = weak.upgrade() else {
            return false;
        };
        let Ok(mut session) = shared.try_borrow_mut() else {
            warn!("Gallery busy, dropping key {:?}", key);
            return false;
        };
        let Some(command) = InputRouter::route_key(key, session.state().layout_mode()) else {
            return false;
        };
        if let Err(e) = session.apply(command) {
            warn!("Key {:?} failed: {}", key, e);
        }
        true
    });

    MountedGallery {
        session,
        _listener: listener,
    }
}
