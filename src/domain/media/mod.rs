pub mod entity;
pub mod invariants;

pub use entity::{MediaItem, MediaKind, NewMediaItem, WatchStatus};
pub use invariants::validate_new_media_item;
