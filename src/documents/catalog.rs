use serde::{Deserialize, Serialize};

use super::GameEntry;

/// Document stored under the catalog storage key. It is persisted as a bare
/// JSON array of entries, newest first.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    pub entries: Vec<GameEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<GameEntry>) -> Self {
        Catalog { entries }
    }

    /// The catalog written on first run, before the user added anything.
    pub fn default_seed() -> Self {
        Catalog {
            entries: vec![
                GameEntry {
                    id: "g1".to_owned(),
                    title: "Sample Runner".to_owned(),
                    thumb: "https://picsum.photos/seed/runner/800/450".to_owned(),
                    url: "games/sample-runner/index.html".to_owned(),
                    tags: vec!["arcade".to_owned(), "runner".to_owned()],
                },
                GameEntry {
                    id: "g2".to_owned(),
                    title: "Mini Shooter".to_owned(),
                    thumb: "https://picsum.photos/seed/shooter/800/450".to_owned(),
                    url: "games/sample-shooter/index.html".to_owned(),
                    tags: vec!["arcade".to_owned(), "shooter".to_owned()],
                },
            ],
        }
    }
}
