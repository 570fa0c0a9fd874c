use crate::documents::{Catalog, GameEntry};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Session filter state: an optional active tag and the free text search.
/// Never persisted.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    #[serde(default)]
    pub active_tag: Option<String>,

    #[serde(default)]
    pub search_text: String,
}

impl CatalogFilter {
    pub fn new() -> Self {
        CatalogFilter::default()
    }

    /// Selects `tag` as the active tag, or clears it if it is already the
    /// active one.
    pub fn toggle_tag(&mut self, tag: &str) {
        self.active_tag = match self.active_tag.as_deref() == Some(tag) {
            true => None,
            false => Some(tag.to_owned()),
        };
    }

    pub fn reset_tag(&mut self) {
        self.active_tag = None;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a GameEntry> {
        visible_entries(catalog, self.active_tag.as_deref(), &self.search_text)
    }
}

/// Returns the entries carrying `active_tag` (if any) whose title or tags
/// contain `search_text`, case-insensitively. Catalog order is preserved.
pub fn visible_entries<'a>(
    catalog: &'a Catalog,
    active_tag: Option<&str>,
    search_text: &str,
) -> Vec<&'a GameEntry> {
    let query = search_text.trim().to_lowercase();

    catalog
        .entries
        .iter()
        .filter(|entry| active_tag.map_or(true, |tag| entry.has_tag(tag)))
        .filter(|entry| {
            query.is_empty()
                || entry.title.to_lowercase().contains(&query)
                || entry.joined_tags().to_lowercase().contains(&query)
        })
        .collect()
}

/// All tags used in the catalog, deduplicated and sorted.
pub fn distinct_tags(catalog: &Catalog) -> Vec<String> {
    catalog
        .entries
        .iter()
        .flat_map(|entry| entry.tags.iter())
        .unique()
        .sorted()
        .cloned()
        .collect()
}
