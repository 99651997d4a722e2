use anyhow::Result;
use popcorn_models::WatchedEntry;
use tracing::{error, info};
use crate::repository::WatchlistRepository;
use crate::stats::WatchlistSummary;

/// Owns the ordered list of watched movies and mirrors it into storage after
/// every mutation.
pub struct WatchlistManager {
    entries: Vec<WatchedEntry>,
    repository: WatchlistRepository,
}

impl WatchlistManager {
    /// Create a manager seeded from whatever the repository holds.
    pub fn load(repository: WatchlistRepository) -> Self {
        let entries = repository.load();
        Self { entries, repository }
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|e| e.imdb_id() == imdb_id)
    }

    /// First entry with this id.
    pub fn find(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.imdb_id() == imdb_id)
    }

    /// Append without checking for an existing entry with the same id.
    ///
    /// Memory only changes once the store accepted the new list.
    pub fn add_watched(&mut self, entry: WatchedEntry) -> Result<()> {
        info!(imdb_id = %entry.imdb_id(), rating = entry.user_rating, "Adding to watchlist");
        let mut candidate = self.entries.clone();
        candidate.push(entry);
        self.commit(candidate)
    }

    /// Remove every entry with this id. Returns how many were removed.
    pub fn remove_watched(&mut self, imdb_id: &str) -> Result<usize> {
        let candidate: Vec<WatchedEntry> = self
            .entries
            .iter()
            .filter(|e| e.imdb_id() != imdb_id)
            .cloned()
            .collect();
        let removed = self.entries.len() - candidate.len();
        info!(imdb_id, removed, "Removing from watchlist");
        self.commit(candidate)?;
        Ok(removed)
    }

    /// Recomputed on every call.
    pub fn summary(&self) -> WatchlistSummary {
        WatchlistSummary::from_entries(&self.entries)
    }

    fn commit(&mut self, candidate: Vec<WatchedEntry>) -> Result<()> {
        self.repository.save(&candidate).map_err(|e| {
            error!(error = %e, "Failed to persist watchlist, keeping previous list");
            e
        })?;
        self.entries = candidate;
        Ok(())
    }
}
