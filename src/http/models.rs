use crate::{documents::GameEntry, library::CatalogFilter};
use serde::{Deserialize, Serialize};

/// Entry as shown in the games grid, with its thumbnail resolved.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GameCard {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub url: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&GameEntry> for GameCard {
    fn from(entry: &GameEntry) -> Self {
        GameCard {
            id: entry.id.clone(),
            title: entry.title.clone(),
            thumbnail: entry.thumbnail(),
            url: entry.url.clone(),
            tags: entry.tags.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TagList {
    pub tags: Vec<String>,

    #[serde(default)]
    pub active_tag: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TagToggle {
    pub tag: String,
}

impl std::fmt::Display for TagToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Search {
    #[serde(default)]
    pub text: String,
}

impl std::fmt::Display for Search {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Play {
    pub id: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FilterState {
    #[serde(default)]
    pub active_tag: Option<String>,

    #[serde(default)]
    pub search_text: String,
}

impl From<&CatalogFilter> for FilterState {
    fn from(filter: &CatalogFilter) -> Self {
        FilterState {
            active_tag: filter.active_tag.clone(),
            search_text: filter.search_text.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ImportReport {
    pub imported: usize,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ErrorReply {
    pub error: String,
}
