pub mod gallery_state;
pub mod media_item;
pub mod media_store;

pub use gallery_state::*;
pub use media_item::*;
pub use media_store::*;
