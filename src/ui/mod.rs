pub mod keybindings;
pub mod surface;

pub use keybindings::{
    GalleryCommand, InputRouter, Key, KeyboardSurface, ListenerGuard, PointerTarget,
};
pub use surface::{HeadlessSurface, RenderSurface};
