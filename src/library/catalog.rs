use crate::{
    documents::{Catalog, GameEntry},
    Status,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::IdGenerator;

/// User supplied fields of a game being added through the admin form.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct GameFields {
    pub title: String,

    #[serde(default)]
    pub thumb: String,

    pub url: String,

    /// Comma separated list of tags.
    #[serde(default)]
    pub tags: String,
}

/// Adds a new game at the front of the catalog. Title and url are required.
pub fn add_entry(
    fields: GameFields,
    catalog: &mut Catalog,
    ids: &mut dyn IdGenerator,
) -> Result<GameEntry, Status> {
    let title = fields.title.trim();
    let url = fields.url.trim();
    if title.is_empty() || url.is_empty() {
        return Err(Status::invalid_argument(MISSING_REQUIRED));
    }

    let entry = GameEntry {
        id: fresh_id(ids, |id| find(catalog, id).is_some()),
        title: title.to_owned(),
        thumb: fields.thumb.trim().to_owned(),
        url: url.to_owned(),
        tags: split_tags(&fields.tags)
            .into_iter()
            .filter(|tag| !tag.is_empty())
            .collect(),
    };
    catalog.entries.insert(0, entry.clone());
    Ok(entry)
}

/// Parses `text` as JSON and imports it with `import_entries()`.
pub fn import_json(
    text: &str,
    catalog: &mut Catalog,
    ids: &mut dyn IdGenerator,
) -> Result<usize, Status> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| Status::invalid_argument(e.to_string()))?;
    import_entries(value, catalog, ids)
}

/// Normalizes every element of the `value` array into a game entry and
/// prepends them, in order, before the existing entries. Returns the number
/// of entries imported.
pub fn import_entries(
    value: Value,
    catalog: &mut Catalog,
    ids: &mut dyn IdGenerator,
) -> Result<usize, Status> {
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(Status::invalid_argument(INVALID_FORMAT)),
    };

    let mut imported = normalize_entries(&items, &catalog.entries, ids);
    let count = imported.len();

    imported.append(&mut catalog.entries);
    catalog.entries = imported;
    Ok(count)
}

/// Returns the catalog as pretty-printed JSON, the format of exported files.
pub fn export_snapshot(catalog: &Catalog) -> Result<String, Status> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

pub fn find<'a>(catalog: &'a Catalog, id: &str) -> Option<&'a GameEntry> {
    catalog.entries.iter().find(|entry| entry.id == id)
}

/// Turns loosely shaped JSON elements into game entries. Missing fields get
/// their defaults and missing ids are generated, distinct from the ids of
/// `existing` and of the other elements.
pub fn normalize_entries(
    items: &[Value],
    existing: &[GameEntry],
    ids: &mut dyn IdGenerator,
) -> Vec<GameEntry> {
    let mut taken: HashSet<String> = existing.iter().map(|e| e.id.clone()).collect();
    taken.extend(
        items
            .iter()
            .filter_map(|item| string_field(item.as_object(), &["id", "identifier"])),
    );

    items
        .iter()
        .map(|item| {
            let item = item.as_object();
            let id = match string_field(item, &["id", "identifier"]) {
                Some(id) => id,
                None => {
                    let id = fresh_id(ids, |id| taken.contains(id));
                    taken.insert(id.clone());
                    id
                }
            };
            GameEntry {
                id,
                title: string_field(item, &["title"]).unwrap_or_else(|| UNTITLED.to_owned()),
                thumb: string_field(item, &["thumb", "thumbnailUrl"]).unwrap_or_default(),
                url: string_field(item, &["url", "launchUrl"]).unwrap_or_default(),
                tags: match item.and_then(|obj| obj.get("tags")) {
                    Some(Value::Array(tags)) => tags.iter().filter_map(scalar_string).collect(),
                    Some(Value::String(tags)) => split_tags(tags),
                    _ => vec![],
                },
            }
        })
        .collect()
}

/// Draws ids from the generator until one is not already taken.
fn fresh_id(ids: &mut dyn IdGenerator, is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = ids.next_id();
        if !id.is_empty() && !is_taken(&id) {
            return id;
        }
    }
}

fn string_field(item: Option<&Map<String, Value>>, keys: &[&str]) -> Option<String> {
    item.and_then(|obj| keys.iter().find_map(|key| obj.get(*key)))
        .and_then(scalar_string)
        .filter(|s| !s.is_empty())
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Splits a comma separated tag list and trims each tag. Empty segments are
/// kept; the add form filters them out itself.
fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',').map(str::trim).map(str::to_owned).collect()
}

const MISSING_REQUIRED: &str = "Title and Game URL are required.";
const INVALID_FORMAT: &str = "Invalid format";
const UNTITLED: &str = "Untitled";
