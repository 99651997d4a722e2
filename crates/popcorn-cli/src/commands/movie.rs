use super::render::{detail_table, results_table};
use super::spinner::LookupSpinner;
use super::open_session;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::{DetailStatus, LookupHandle, SearchStatus, TitleBar};
use serde_json::json;

async fn settle_with_spinner(handle: LookupHandle, msg: String, output: &Output) {
    if output.is_human() && !output.is_quiet() {
        let spinner = LookupSpinner::start(msg);
        handle.settled().await;
        spinner.finish();
    } else {
        handle.settled().await;
    }
}

pub async fn run_search(config: &Config, paths: &PathManager, query: &str, output: &Output) -> Result<()> {
    let session = open_session(config, paths, TitleBar::new())?;

    let handle = session.set_query(query).await;
    settle_with_spinner(handle, format!("Searching for \"{}\"...", query), output).await;
    let state = session.search_state().await;

    if !output.is_human() {
        output.json(&serde_json::to_value(&state)?);
        return Ok(());
    }

    match state.status {
        SearchStatus::Idle => output.warn("Type a movie title to search"),
        SearchStatus::Error => output.error(&state.error),
        SearchStatus::Success | SearchStatus::Loading => {
            output.heading(state.count_label());
            output.println(results_table(&state.results).to_string());
        }
    }
    Ok(())
}

pub async fn run_show(config: &Config, paths: &PathManager, imdb_id: &str, output: &Output) -> Result<()> {
    let session = open_session(config, paths, TitleBar::new())?;

    let handle = session.select(imdb_id).await;
    settle_with_spinner(handle, format!("Loading {}...", imdb_id), output).await;
    let view = session.detail_view().await;

    if !output.is_human() {
        output.json(&serde_json::to_value(&view)?);
        return Ok(());
    }

    match (&view.snapshot.status, &view.snapshot.movie) {
        (DetailStatus::Loaded, Some(movie)) => {
            output.heading(session.title());
            output.println(detail_table(movie).to_string());
            match view.rated_message() {
                Some(message) => output.info(message),
                None => output.info(format!("Not watched yet. Rate it with: popcorn add {} --rating <1-10>", imdb_id)),
            }
        }
        _ => output.error(&view.snapshot.error),
    }
    Ok(())
}

pub async fn run_add(config: &Config, paths: &PathManager, imdb_id: &str, rating: u8, output: &Output) -> Result<()> {
    let mut session = open_session(config, paths, TitleBar::new())?;

    let handle = session.select(imdb_id).await;
    settle_with_spinner(handle, format!("Loading {}...", imdb_id), output).await;
    let view = session.detail_view().await;

    if view.snapshot.status != DetailStatus::Loaded {
        output.error(&view.snapshot.error);
        return Ok(());
    }
    if let Some(message) = view.rated_message() {
        output.warn(format!("Already on your watched list. {}", message));
        return Ok(());
    }

    let committed = session.detail().rate(rating).await
        .ok_or_else(|| eyre!("Rating must be between 1 and {}", popcorn_core::detail::DETAIL_MAX_RATING))?;
    let title = view.snapshot.movie.as_ref().map(|m| m.title.clone()).unwrap_or_default();

    let added = session
        .add_selected_to_watchlist()
        .await
        .map_err(|e| eyre!("Failed to save watched list: {}", e))?;

    if !added {
        output.warn(format!("{} was not added", imdb_id));
        return Ok(());
    }

    if output.is_human() {
        output.success(format!("Added {} to your watched list, rated {}", title, committed));
        output.info(format!("{} movies watched", session.watchlist().len()));
    } else {
        output.json(&json!({
            "type": "success",
            "imdbID": imdb_id,
            "title": title,
            "passedRate": committed,
            "watched": session.watchlist().len(),
        }));
    }
    Ok(())
}
