mod catalog;
mod game_entry;
mod viewer_state;

pub use catalog::Catalog;
pub use game_entry::GameEntry;
pub use viewer_state::{ViewerState, BLANK_FRAME};
