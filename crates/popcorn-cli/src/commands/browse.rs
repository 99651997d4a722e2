use super::open_session;
use super::prompts::{prompt_select, prompt_string, prompt_yes_no};
use super::render::{detail_table, results_table, summary_table, watched_table};
use super::spinner::{is_interactive, LookupSpinner};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::detail::DETAIL_MAX_RATING;
use popcorn_core::{DetailStatus, SearchStatus, Session, TitleBar};
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Pick,
    ToggleResults,
    ToggleWatched,
    Remove,
    Quit,
}

/// Mirror the session title into the terminal window title
fn terminal_title_bar() -> TitleBar {
    TitleBar::with_listener(|title| {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\x1b]0;{}\x07", title);
        let _ = stdout.flush();
    })
}

pub async fn run_browse(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    if !is_interactive() || !output.is_human() {
        return Err(eyre!("browse needs an interactive terminal and human output"));
    }

    let title = terminal_title_bar();
    title.reset();
    let mut session = open_session(config, paths, title)?;

    loop {
        draw(&session, output).await;

        let actions = menu(&session).await;
        let labels: Vec<String> = actions.iter().map(|(_, label)| label.clone()).collect();
        let Some(choice) = prompt_select("What next?", &labels, 0)? else {
            break;
        };

        match actions[choice].0 {
            Action::Search => search(&session, output).await?,
            Action::Pick => pick(&mut session, output).await?,
            Action::ToggleResults => {
                session.toggle_results_panel();
            }
            Action::ToggleWatched => {
                session.toggle_watched_panel();
            }
            Action::Remove => remove(&mut session, output)?,
            Action::Quit => break,
        }
    }

    session.close_detail().await;
    debug!("Browse session ended");
    Ok(())
}

async fn menu(session: &Session) -> Vec<(Action, String)> {
    let state = session.search_state().await;
    let mut actions = vec![(Action::Search, "Search movies".to_string())];

    if state.status == SearchStatus::Success {
        actions.push((Action::Pick, format!("Pick a result ({})", state.results.len())));
        let panel = session.results_panel();
        actions.push((Action::ToggleResults, format!("[{}] Results", panel.marker())));
    }

    let panel = session.watched_panel();
    actions.push((Action::ToggleWatched, format!("[{}] Watched", panel.marker())));
    if !session.watchlist().is_empty() {
        actions.push((Action::Remove, "Remove a watched movie".to_string()));
    }
    actions.push((Action::Quit, "Quit".to_string()));
    actions
}

async fn draw(session: &Session, output: &Output) {
    output.println("");
    output.heading(format!("🍿 {}", session.title()));

    let state = session.search_state().await;
    match state.status {
        SearchStatus::Success => {
            output.info(state.count_label());
            if session.results_panel().is_open() {
                output.println(results_table(&state.results).to_string());
            }
        }
        SearchStatus::Error => output.error(&state.error),
        SearchStatus::Idle | SearchStatus::Loading => {}
    }

    output.println(summary_table(&session.summary()).to_string());
    if session.watched_panel().is_open() && !session.watchlist().is_empty() {
        output.println(watched_table(session.watchlist().entries()).to_string());
    }
}

async fn search(session: &Session, output: &Output) -> Result<()> {
    let query = prompt_string("Search movies...", None)?;
    let handle = session.set_query(query.clone()).await;
    if handle.is_pending() {
        let spinner = LookupSpinner::start(format!("Searching for \"{}\"...", query));
        handle.settled().await;
        spinner.finish();
    } else {
        handle.settled().await;
        output.info("Search cleared");
    }
    Ok(())
}

async fn pick(session: &mut Session, output: &Output) -> Result<()> {
    let state = session.search_state().await;
    let labels: Vec<String> = state
        .results
        .iter()
        .map(|m| format!("{} ({})", m.title, m.year))
        .collect();
    let Some(index) = prompt_select("Select a movie", &labels, 0)? else {
        return Ok(());
    };
    let imdb_id = state.results[index].imdb_id.clone();

    let handle = session.detail().open(&imdb_id).await;
    let spinner = LookupSpinner::start(format!("Loading {}...", labels[index]));
    handle.settled().await;
    spinner.finish();

    let view = session.detail_view().await;
    let movie = match (&view.snapshot.status, &view.snapshot.movie) {
        (DetailStatus::Loaded, Some(movie)) => movie.clone(),
        _ => {
            output.error(&view.snapshot.error);
            session.close_detail().await;
            return Ok(());
        }
    };

    output.println(detail_table(&movie).to_string());
    if let Some(message) = view.rated_message() {
        output.info(message);
        prompt_string("Press Enter to go back", None)?;
        session.close_detail().await;
        return Ok(());
    }

    let Some(rating) = choose_rating(session).await? else {
        session.close_detail().await;
        return Ok(());
    };
    output.info(session.detail().render_rating().await);

    if prompt_yes_no(&format!("+ Add {} to watched list?", movie.title), Some(true))? {
        let added = session
            .add_selected_to_watchlist()
            .await
            .map_err(|e| eyre!("Failed to save watched list: {}", e))?;
        if added {
            output.success(format!("Added {} rated {}", movie.title, rating));
        }
    }
    session.close_detail().await;
    Ok(())
}

/// Star picker. Each entry is rendered by previewing that value on the
/// detail rating, so the strip matches what gets committed.
async fn choose_rating(session: &Session) -> Result<Option<u8>> {
    let detail = session.detail();
    let mut labels = Vec::with_capacity(DETAIL_MAX_RATING as usize);
    for i in 1..=DETAIL_MAX_RATING {
        if detail.hover_rating(i).await {
            labels.push(detail.render_rating().await);
        }
    }
    detail.leave_rating().await;

    if labels.is_empty() {
        return Ok(None);
    }

    let Some(index) = prompt_select("Rate this movie", &labels, 0)? else {
        return Ok(None);
    };
    Ok(detail.rate(index as u8 + 1).await)
}

fn remove(session: &mut Session, output: &Output) -> Result<()> {
    let entries: Vec<(String, String)> = session
        .watchlist()
        .entries()
        .iter()
        .map(|e| (e.imdb_id().to_string(), format!("{} 🌟 {}", e.movie.title, e.user_rating)))
        .collect();
    let labels: Vec<&str> = entries.iter().map(|(_, label)| label.as_str()).collect();

    let Some(index) = prompt_select("Remove which movie?", &labels, 0)? else {
        return Ok(());
    };
    let imdb_id = &entries[index].0;

    session
        .remove_watched(imdb_id)
        .map_err(|e| eyre!("Failed to save watched list: {}", e))?;
    output.success(format!("Removed {}", labels[index]));
    Ok(())
}
