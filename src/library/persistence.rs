use crate::{documents::Catalog, Status};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{catalog, IdGenerator, KeyValueStore};

/// Reads the catalog stored under the catalog key. On first run, when
/// nothing is stored, the default catalog is written and returned. A stored
/// value that is not a JSON array yields an empty catalog. Array elements are
/// normalized like imported ones, so entries missing fields are kept.
#[instrument(name = "persistence::load", level = "trace", skip(store, ids))]
pub fn load(
    store: &mut dyn KeyValueStore,
    ids: &mut dyn IdGenerator,
) -> Result<Catalog, Status> {
    let raw = store.get(STORAGE_KEY)?;

    match raw {
        Some(raw) if !raw.is_empty() => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => {
                let catalog = Catalog::new(catalog::normalize_entries(&items, &[], ids));
                info!("loaded catalog with {} entries", catalog.entries.len());
                Ok(catalog)
            }
            Ok(_) => {
                warn!("stored catalog is not an array, starting empty");
                Ok(Catalog::default())
            }
            Err(e) => {
                warn!("stored catalog is corrupted, starting empty: {e}");
                Ok(Catalog::default())
            }
        },
        _ => {
            let catalog = Catalog::default_seed();
            save(store, &catalog)?;
            info!("seeded catalog with {} sample entries", catalog.entries.len());
            Ok(catalog)
        }
    }
}

/// Overwrites the stored catalog with `catalog`.
#[instrument(
    name = "persistence::save",
    level = "trace",
    skip(store, catalog),
    fields(entries = catalog.entries.len())
)]
pub fn save(store: &mut dyn KeyValueStore, catalog: &Catalog) -> Result<(), Status> {
    let json = serde_json::to_string(catalog)?;
    store.set(STORAGE_KEY, json)
}

pub const STORAGE_KEY: &str = "mini_games_library_v1";
