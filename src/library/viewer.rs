use crate::documents::{GameEntry, ViewerState, BLANK_FRAME};
use tracing::info;

/// Embedded game viewer. Opening a game loads its url in the frame and
/// exposes the same url as a direct link; closing blanks the frame.
#[derive(Default, Debug, Clone)]
pub struct Viewer {
    state: ViewerState,
}

impl Viewer {
    pub fn new() -> Self {
        Viewer::default()
    }

    pub fn open(&mut self, game: &GameEntry) -> &ViewerState {
        info!("opening {game}");
        self.state = ViewerState {
            visible: true,
            game_id: Some(game.id.clone()),
            title: game.title.clone(),
            frame_src: game.url.clone(),
            open_in_new: Some(game.url.clone()),
        };
        &self.state
    }

    pub fn close(&mut self) -> &ViewerState {
        self.state.visible = false;
        self.state.frame_src = BLANK_FRAME.to_owned();
        &self.state
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }
}
