use anyhow::Result;
use chrono::Utc;
use popcorn_models::WatchedEntry;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::store::KeyValueStore;

/// Storage key of the watchlist. Shared with previously persisted data.
pub const WATCHLIST_KEY: &str = "WatchedLocSto";

/// Load/save contract for the watchlist over an injected key-value store.
#[derive(Clone)]
pub struct WatchlistRepository {
    store: Arc<dyn KeyValueStore>,
}

impl WatchlistRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the stored watchlist.
    ///
    /// Never fails: a missing value is an empty list, and an unreadable or
    /// unparseable value is logged, copied aside under a backup key and
    /// treated as an empty list.
    pub fn load(&self) -> Vec<WatchedEntry> {
        let raw = match self.store.get(WATCHLIST_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored watchlist, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored watchlist, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<WatchedEntry>>(&raw) {
            Ok(entries) => {
                info!(count = entries.len(), "Loaded watchlist");
                entries
            }
            Err(e) => {
                let backup_key = format!("{}.corrupt-{}", WATCHLIST_KEY, Utc::now().format("%Y%m%dT%H%M%SZ"));
                match self.store.set(&backup_key, &raw) {
                    Ok(()) => warn!(
                        error = %e,
                        backup_key = %backup_key,
                        "Stored watchlist is not valid JSON. Backed it up and starting with an empty watchlist."
                    ),
                    Err(backup_err) => warn!(
                        error = %e,
                        backup_error = %backup_err,
                        "Stored watchlist is not valid JSON and could not be backed up. Starting with an empty watchlist."
                    ),
                }
                Vec::new()
            }
        }
    }

    /// Overwrite the stored watchlist with `entries`.
    pub fn save(&self, entries: &[WatchedEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(WATCHLIST_KEY, &json)?;
        debug!(count = entries.len(), "Saved watchlist");
        Ok(())
    }

    /// Raw stored value, as written by the last save.
    pub fn raw(&self) -> Result<Option<String>> {
        self.store.get(WATCHLIST_KEY)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(WATCHLIST_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKeyValueStore;
    use popcorn_models::MovieDetail;

    fn entry(imdb_id: &str, rating: u8) -> WatchedEntry {
        WatchedEntry::new(
            MovieDetail {
                imdb_id: imdb_id.to_string(),
                title: format!("Movie {}", imdb_id),
                ..MovieDetail::default()
            },
            rating,
        )
    }

    #[test]
    fn test_missing_value_loads_empty() {
        let repo = WatchlistRepository::new(Arc::new(MemoryKeyValueStore::new()));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = WatchlistRepository::new(store.clone());
        repo.save(&[entry("tt001", 7), entry("tt002", 9)]).unwrap();

        let loaded = WatchlistRepository::new(store).load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].imdb_id(), "tt001");
        assert_eq!(loaded[1].user_rating, 9);
    }

    #[test]
    fn test_save_writes_compact_json_array() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = WatchlistRepository::new(store);
        repo.save(&[]).unwrap();
        assert_eq!(repo.raw().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_corrupt_value_fails_closed_with_backup() {
        let store = Arc::new(MemoryKeyValueStore::with_value(WATCHLIST_KEY, "{not json"));
        let repo = WatchlistRepository::new(store.clone());

        assert!(repo.load().is_empty());

        let keys = store.keys();
        assert_eq!(keys.len(), 2);
        let backup = keys.iter().find(|k| k.starts_with("WatchedLocSto.corrupt-")).unwrap();
        assert_eq!(store.get(backup).unwrap().as_deref(), Some("{not json"));
        // The stored value is left alone until the next save
        assert_eq!(store.get(WATCHLIST_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_clear() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = WatchlistRepository::new(store);
        repo.save(&[entry("tt001", 5)]).unwrap();
        repo.clear().unwrap();
        assert_eq!(repo.raw().unwrap(), None);
    }
}
