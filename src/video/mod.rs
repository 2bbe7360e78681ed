pub mod bridge;
pub mod player;
pub mod registry;

pub use bridge::{
    begin_layout_transition, complete_layout_transition, LayoutTransition, PlaybackCapture,
    PlaybackSnapshot, RestoreReport,
};
pub use player::{HeadlessElement, MediaElement, PlaybackState};
pub use registry::MediaElementRegistry;
