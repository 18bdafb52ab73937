//! UI Components

pub mod cover;
pub mod draw;
pub mod loading;
pub mod preview;
pub mod rows;
pub mod scroll_cards;

pub use cover::CoverOverlay;
pub use loading::LoadingOverlay;
pub use preview::{PreviewAction, PreviewView};
pub use rows::{GalleryRows, RowsAction};
pub use scroll_cards::{card_pose, CardPose, ScrollDeck};
