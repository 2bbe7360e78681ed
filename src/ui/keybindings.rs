// Keybindings for the video gallery
// Maps keyboard and pointer input to gallery commands
//
// Keybindings:
// - 0-4: Column count for grid, split screen and stacked (0 = adaptive,
//   except split screen where 0 means the default of 2)
// - ArrowLeft / ArrowRight: Previous / next video in slideshow
//
// Everything else is ignored.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::layout::{LayoutMode, MAX_COLUMNS};
use crate::models::MediaHandle;

/// Column count that split screen falls back to for the `0` key.
const SPLIT_SCREEN_ZERO_COLUMNS: u8 = 2;

/// A key as delivered by the host surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Character(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    Space,
}

/// Pointer targets the gallery chrome exposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Slideshow thumbnail at a list index
    Thumbnail(usize),
    SlideshowPrevious,
    SlideshowNext,
    /// Remove control of the item at a list index
    RemoveControl(usize),
    /// Circle layout item
    CircleItem(MediaHandle),
    DropZoneToggle,
}

/// A state change requested by user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryCommand {
    SetColumnOverride { mode: LayoutMode, columns: u8 },
    MoveFocus(i64),
    FocusIndex(usize),
    RemoveItem(usize),
    TogglePlayback(MediaHandle),
    ToggleDropZone,
}

/// Stateless translation of input events into commands.
pub struct InputRouter;

impl InputRouter {
    /// Routes a key press under the active layout. `None` means not handled.
    pub fn route_key(key: &Key, mode: LayoutMode) -> Option<GalleryCommand> {
        match key {
            Key::Character(c) if mode.supports_columns() => {
                let digit = c.to_digit(10)? as u8;
                if digit > MAX_COLUMNS {
                    return None;
                }
                let columns = if mode == LayoutMode::SplitScreen && digit == 0 {
                    SPLIT_SCREEN_ZERO_COLUMNS
                } else {
                    digit
                };
                Some(GalleryCommand::SetColumnOverride { mode, columns })
            }
            Key::ArrowLeft if mode == LayoutMode::Slideshow => Some(GalleryCommand::MoveFocus(-1)),
            Key::ArrowRight if mode == LayoutMode::Slideshow => Some(GalleryCommand::MoveFocus(1)),
            _ => None,
        }
    }

    pub fn route_pointer(target: &PointerTarget) -> GalleryCommand {
        match target {
            PointerTarget::Thumbnail(index) => GalleryCommand::FocusIndex(*index),
            PointerTarget::SlideshowPrevious => GalleryCommand::MoveFocus(-1),
            PointerTarget::SlideshowNext => GalleryCommand::MoveFocus(1),
            PointerTarget::RemoveControl(index) => GalleryCommand::RemoveItem(*index),
            PointerTarget::CircleItem(handle) => GalleryCommand::TogglePlayback(handle.clone()),
            PointerTarget::DropZoneToggle => GalleryCommand::ToggleDropZone,
        }
    }
}

/// Callback type for key listeners. Returns true when the key was handled.
pub type KeyListener = Rc<dyn Fn(&Key) -> bool>;

type ListenerList = RefCell<Vec<(u64, KeyListener)>>;

/// Process-wide key source that listeners attach to for a bounded scope.
#[derive(Default)]
pub struct KeyboardSurface {
    listeners: Rc<ListenerList>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for KeyboardSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardSurface")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl KeyboardSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `listener` until the returned guard is dropped.
    #[must_use = "dropping the guard detaches the listener"]
    pub fn subscribe<F>(&self, listener: F) -> ListenerGuard
    where
        F: Fn(&Key) -> bool + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));

        ListenerGuard {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Delivers `key` to listeners in subscription order, stopping at the first
    /// that handles it.
    pub fn dispatch(&self, key: &Key) -> bool {
        // Snapshot so listeners may subscribe or detach while handling.
        let listeners: Vec<KeyListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        listeners.iter().any(|listener| listener(key))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Keeps a key listener attached; detaches it on drop.
pub struct ListenerGuard {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
