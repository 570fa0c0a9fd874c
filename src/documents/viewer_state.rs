use serde::{Deserialize, Serialize};

/// Snapshot of the embedded game viewer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    pub visible: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,

    #[serde(default)]
    pub title: String,

    /// Source loaded in the sandboxed frame.
    pub frame_src: String,

    /// Direct link opening the game outside the viewer.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_in_new: Option<String>,
}

impl Default for ViewerState {
    fn default() -> Self {
        ViewerState {
            visible: false,
            game_id: None,
            title: String::default(),
            frame_src: BLANK_FRAME.to_owned(),
            open_in_new: None,
        }
    }
}

pub const BLANK_FRAME: &str = "about:blank";
