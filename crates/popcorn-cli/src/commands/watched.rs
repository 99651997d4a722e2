use super::open_repository;
use super::render::{summary_table, watched_table};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::PathManager;
use popcorn_core::WatchlistManager;
use serde_json::json;

pub fn run_watched(paths: &PathManager, output: &Output) -> Result<()> {
    let watchlist = WatchlistManager::load(open_repository(paths)?);
    let summary = watchlist.summary();

    if !output.is_human() {
        output.json(&json!({
            "summary": summary,
            "watched": watchlist.entries(),
        }));
        return Ok(());
    }

    output.println(summary_table(&summary).to_string());
    if watchlist.is_empty() {
        output.info("No watched movies yet. Add one with: popcorn add <imdb-id> --rating <1-10>");
    } else {
        output.println(watched_table(watchlist.entries()).to_string());
    }
    Ok(())
}

pub fn run_remove(paths: &PathManager, imdb_id: &str, output: &Output) -> Result<()> {
    let mut watchlist = WatchlistManager::load(open_repository(paths)?);

    let removed = watchlist
        .remove_watched(imdb_id)
        .map_err(|e| eyre!("Failed to save watched list: {}", e))?;

    if removed == 0 {
        output.warn(format!("{} is not on your watched list", imdb_id));
    } else {
        output.success(format!("Removed {} from your watched list ({} left)", imdb_id, watchlist.len()));
    }
    Ok(())
}
