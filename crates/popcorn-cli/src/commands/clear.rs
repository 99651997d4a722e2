use super::open_repository;
use super::prompts;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::PathManager;

pub fn run_clear(watchlist: bool, yes: bool, paths: &PathManager, output: &Output) -> Result<()> {
    if !watchlist {
        output.warn("No clear option specified. Use --watchlist");
        output.println("\nExample: popcorn clear --watchlist");
        return Ok(());
    }

    clear_watchlist(yes, paths, output)
}

fn clear_watchlist(yes: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let repository = open_repository(paths)?;

    let stored = repository
        .raw()
        .map_err(|e| eyre!("Failed to read watched list: {}", e))?;
    if stored.is_none() {
        output.info("No watched list found to clear");
        return Ok(());
    }

    if !yes && !prompts::prompt_yes_no("Delete your watched list? This cannot be undone", Some(false))? {
        output.info("Nothing cleared");
        return Ok(());
    }

    repository
        .clear()
        .map_err(|e| eyre!("Failed to clear watched list: {}", e))?;
    output.success(format!("Cleared watched list in {}", paths.storage_dir().display()));
    Ok(())
}
