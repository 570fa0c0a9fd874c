use serde::{Deserialize, Serialize};
use std::fmt;

/// A single embeddable game in the catalog.
///
/// Serialized with the short keys used by the stored catalog (`id`, `thumb`,
/// `url`). The long forms are accepted on input.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct GameEntry {
    #[serde(alias = "identifier")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    #[serde(alias = "thumbnailUrl")]
    pub thumb: String,

    #[serde(default)]
    #[serde(alias = "launchUrl")]
    pub url: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl GameEntry {
    /// Returns the thumbnail to display for the entry. Entries without one get
    /// a placeholder image seeded by their title.
    pub fn thumbnail(&self) -> String {
        match self.thumb.is_empty() {
            false => self.thumb.clone(),
            true => format!(
                "{PLACEHOLDER_HOST}/seed/{}/800/450",
                urlencoding::encode(&self.title)
            ),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Tags joined with a single space, the form used for search matching.
    pub fn joined_tags(&self) -> String {
        self.tags.join(" ")
    }
}

impl fmt::Display for GameEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameEntry({}): '{}'", &self.id, &self.title)
    }
}

const PLACEHOLDER_HOST: &str = "https://picsum.photos";
