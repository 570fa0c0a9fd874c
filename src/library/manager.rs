use crate::{
    documents::{Catalog, GameEntry, ViewerState},
    Status,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{
    catalog::{self, GameFields},
    filter::{self, CatalogFilter},
    persistence, IdGenerator, KeyValueStore, Viewer,
};

/// Owns the catalog of a session together with its backing store, the
/// filter selections and the viewer. Every successful mutation is persisted
/// before returning.
pub struct CatalogManager {
    store: Box<dyn KeyValueStore>,
    ids: Box<dyn IdGenerator>,
    catalog: Catalog,
    filter: CatalogFilter,
    viewer: Viewer,
}

impl CatalogManager {
    /// Creates a CatalogManager loading the catalog kept in `store`.
    pub fn load(
        mut store: Box<dyn KeyValueStore>,
        mut ids: Box<dyn IdGenerator>,
    ) -> Result<Self, Status> {
        let catalog = persistence::load(store.as_mut(), ids.as_mut())?;
        Ok(CatalogManager {
            store,
            ids,
            catalog,
            filter: CatalogFilter::new(),
            viewer: Viewer::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[instrument(level = "trace", skip(self, game), fields(title = %game.title))]
    pub fn add_entry(&mut self, game: GameFields) -> Result<GameEntry, Status> {
        let entry = self.commit(|next, ids| catalog::add_entry(game, next, ids))?;
        info!("added {entry}");
        Ok(entry)
    }

    #[instrument(level = "trace", skip(self, text))]
    pub fn import_json(&mut self, text: &str) -> Result<usize, Status> {
        let count = self.commit(|next, ids| catalog::import_json(text, next, ids))?;
        info!("imported {count} games");
        Ok(count)
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn import_entries(&mut self, value: Value) -> Result<usize, Status> {
        let count = self.commit(|next, ids| catalog::import_entries(value, next, ids))?;
        info!("imported {count} games");
        Ok(count)
    }

    pub fn export_snapshot(&self) -> Result<String, Status> {
        catalog::export_snapshot(&self.catalog)
    }

    pub fn visible_entries(&self) -> Vec<&GameEntry> {
        self.filter.visible(&self.catalog)
    }

    pub fn distinct_tags(&self) -> Vec<String> {
        filter::distinct_tags(&self.catalog)
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn toggle_tag(&mut self, tag: &str) -> &CatalogFilter {
        self.filter.toggle_tag(tag);
        &self.filter
    }

    pub fn reset_tag(&mut self) -> &CatalogFilter {
        self.filter.reset_tag();
        &self.filter
    }

    pub fn set_search(&mut self, text: impl Into<String>) -> &CatalogFilter {
        self.filter.set_search(text);
        &self.filter
    }

    pub fn open_game(&mut self, id: &str) -> Result<&ViewerState, Status> {
        match catalog::find(&self.catalog, id) {
            Some(game) => Ok(self.viewer.open(game)),
            None => Err(Status::not_found(format!("Game '{id}' is not in the catalog"))),
        }
    }

    pub fn close_viewer(&mut self) -> &ViewerState {
        self.viewer.close()
    }

    pub fn viewer(&self) -> &ViewerState {
        self.viewer.state()
    }

    /// Applies `transition` to a copy of the catalog and keeps the result
    /// only once it is saved. On any failure the catalog is left as it was.
    fn commit<T>(
        &mut self,
        transition: impl FnOnce(&mut Catalog, &mut dyn IdGenerator) -> Result<T, Status>,
    ) -> Result<T, Status> {
        let mut next = self.catalog.clone();
        let result = transition(&mut next, self.ids.as_mut())?;

        if let Err(status) = persistence::save(self.store.as_mut(), &next) {
            warn!("failed to persist catalog: {status}");
            return Err(status);
        }
        self.catalog = next;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{MemoryStore, SequentialIds, STORAGE_KEY};
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    };

    /// Store that shares its contents with the test and counts writes.
    #[derive(Clone, Default)]
    struct SharedStore {
        inner: Arc<Mutex<(MemoryStore, usize)>>,
        broken: Arc<AtomicBool>,
    }

    impl SharedStore {
        fn break_writes(&self) {
            self.broken.store(true, Ordering::SeqCst);
        }

        fn writes(&self) -> usize {
            self.inner.lock().unwrap().1
        }

        fn stored_catalog(&self) -> Catalog {
            let raw = self.inner.lock().unwrap().0.get(STORAGE_KEY).unwrap().unwrap();
            serde_json::from_str(&raw).unwrap()
        }
    }

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, Status> {
            self.inner.lock().unwrap().0.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> Result<(), Status> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(Status::from(std::io::Error::other("disk full")));
            }
            let mut inner = self.inner.lock().unwrap();
            inner.1 += 1;
            inner.0.set(key, value)
        }
    }

    fn load_manager(store: &SharedStore) -> CatalogManager {
        CatalogManager::load(Box::new(store.clone()), Box::new(SequentialIds::new("t"))).unwrap()
    }

    #[test]
    fn load_seeds_empty_store() {
        let store = SharedStore::default();
        let manager = load_manager(&store);

        assert_eq!(manager.catalog(), &Catalog::default_seed());
        assert_eq!(store.writes(), 1);
        assert_eq!(store.stored_catalog(), Catalog::default_seed());
    }

    #[test]
    fn add_entry_is_persisted() {
        let store = SharedStore::default();
        let mut manager = load_manager(&store);

        let entry = manager
            .add_entry(GameFields {
                title: "Pong".to_owned(),
                url: "pong.html".to_owned(),
                tags: "retro".to_owned(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(entry.id, "t1");
        assert_eq!(store.stored_catalog().entries[0], entry);
        assert_eq!(manager.distinct_tags(), vec!["arcade", "retro", "runner", "shooter"]);
    }

    #[test]
    fn failed_add_does_not_write() {
        let store = SharedStore::default();
        let mut manager = load_manager(&store);

        let status = manager.add_entry(GameFields::default()).unwrap_err();
        assert!(matches!(status, Status::InvalidArgument(_)));
        assert_eq!(store.writes(), 1);
        assert_eq!(manager.catalog().entries.len(), 2);
    }

    #[test]
    fn import_is_persisted() {
        let store = SharedStore::default();
        let mut manager = load_manager(&store);

        let count = manager
            .import_json(r#"[{"title":"A","url":"x"},{"title":"B","url":"y","tags":"x, y"}]"#)
            .unwrap();
        assert_eq!(count, 2);

        let reloaded = load_manager(&store);
        assert_eq!(reloaded.catalog().entries.len(), 4);
        assert_eq!(reloaded.catalog().entries[1].tags, vec!["x", "y"]);
    }

    #[test]
    fn failed_import_does_not_write() {
        let store = SharedStore::default();
        let mut manager = load_manager(&store);

        assert!(manager.import_json(r#"{"title":"A"}"#).is_err());
        assert!(manager.import_json("not json").is_err());
        assert_eq!(store.writes(), 1);
        assert_eq!(manager.catalog(), &Catalog::default_seed());
    }

    #[test]
    fn filter_state_drives_visible_entries() {
        let store = SharedStore::default();
        let mut manager = load_manager(&store);

        manager.set_search("shoot");
        assert_eq!(manager.visible_entries().len(), 1);

        manager.set_search("");
        manager.toggle_tag("runner");
        assert_eq!(manager.visible_entries()[0].title, "Sample Runner");

        manager.toggle_tag("runner");
        assert_eq!(manager.visible_entries().len(), 2);
    }

    #[test]
    fn open_and_close_game() {
        let store = SharedStore::default();
        let mut manager = load_manager(&store);

        assert!(matches!(
            manager.open_game("missing"),
            Err(Status::NotFound(_))
        ));

        let state = manager.open_game("g1").unwrap();
        assert_eq!(state.frame_src, "games/sample-runner/index.html");

        assert_eq!(manager.close_viewer().frame_src, "about:blank");
    }

    #[test]
    fn failed_save_leaves_catalog_unchanged() {
        let store = SharedStore::default();
        let mut manager = load_manager(&store);
        store.break_writes();

        let status = manager
            .add_entry(GameFields {
                title: "Pong".to_owned(),
                url: "pong.html".to_owned(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(status, Status::Internal(_)));

        assert!(manager.import_json(r#"[{"title":"A","url":"x"}]"#).is_err());
        assert_eq!(manager.catalog(), &Catalog::default_seed());
        assert_eq!(store.stored_catalog(), Catalog::default_seed());
    }

    #[test]
    fn save_after_failed_one_does_not_resurrect_entries() {
        let store = SharedStore::default();
        let mut manager = load_manager(&store);

        store.break_writes();
        assert!(manager.import_json(r#"[{"title":"Lost","url":"x"}]"#).is_err());

        store.broken.store(false, Ordering::SeqCst);
        manager
            .add_entry(GameFields {
                title: "Pong".to_owned(),
                url: "pong.html".to_owned(),
                ..Default::default()
            })
            .unwrap();

        let titles: Vec<String> = store
            .stored_catalog()
            .entries
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Pong", "Sample Runner", "Mini Shooter"]);
    }

    #[test]
    fn add_with_colliding_generator_gets_unique_id() {
        let store = SharedStore::default();
        let mut manager =
            CatalogManager::load(Box::new(store.clone()), Box::new(SequentialIds::new("g")))
                .unwrap();

        let entry = manager
            .add_entry(GameFields {
                title: "P".to_owned(),
                url: "p".to_owned(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(
            manager.catalog().entries.iter().filter(|e| e.id == entry.id).count(),
            1
        );
    }
}
