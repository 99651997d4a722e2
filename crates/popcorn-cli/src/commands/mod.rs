pub mod browse;
pub mod clear;
pub mod config;
pub mod movie;
pub mod prompts;
pub mod render;
pub mod spinner;
pub mod watched;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::{FileKeyValueStore, Session, TitleBar, WatchlistRepository};
use popcorn_sources::{MovieDirectory, OmdbClient};
use std::sync::Arc;
use tracing::debug;

/// Repository over the on-disk key/value store in the data directory
pub fn open_repository(paths: &PathManager) -> Result<WatchlistRepository> {
    let storage_dir = paths.storage_dir();
    let store = FileKeyValueStore::new(&storage_dir)
        .map_err(|e| eyre!("Failed to open storage at {}: {}", storage_dir.display(), e))?;
    Ok(WatchlistRepository::new(Arc::new(store)))
}

/// Wire the OMDb client, the stored watchlist and the title bar into a session
pub fn open_session(config: &Config, paths: &PathManager, title: TitleBar) -> Result<Session> {
    let client = OmdbClient::from_config(&config.omdb)
        .map_err(|e| eyre!("Failed to create OMDb client: {}", e))?;
    debug!(source = client.source_name(), base_url = client.base_url(), "Using movie directory");
    let repository = open_repository(paths)?;
    Ok(Session::new(Arc::new(client), repository, title))
}
