use anyhow::Result;
use popcorn_sources::MovieDirectory;
use std::sync::Arc;
use crate::detail::{DetailView, DetailViewer};
use crate::lookup::LookupHandle;
use crate::panel::Panel;
use crate::repository::WatchlistRepository;
use crate::search::{SearchController, SearchState};
use crate::stats::WatchlistSummary;
use crate::title::TitleBar;
use crate::watchlist::WatchlistManager;

/// Everything a front end needs: search, detail, watchlist, title and panels.
pub struct Session {
    search: SearchController,
    detail: DetailViewer,
    watchlist: WatchlistManager,
    title: TitleBar,
    results_panel: Panel,
    watched_panel: Panel,
}

impl Session {
    pub fn new(directory: Arc<dyn MovieDirectory>, repository: WatchlistRepository, title: TitleBar) -> Self {
        let detail = DetailViewer::new(directory.clone(), title.clone());
        let search = SearchController::new(directory, detail.clone());
        Self {
            search,
            detail,
            watchlist: WatchlistManager::load(repository),
            title,
            results_panel: Panel::new(),
            watched_panel: Panel::new(),
        }
    }

    pub async fn set_query(&self, query: impl Into<String>) -> LookupHandle {
        self.search.set_query(query).await
    }

    pub async fn search_state(&self) -> SearchState {
        self.search.state().await
    }

    /// Toggle selection of a result.
    pub async fn select(&self, imdb_id: &str) -> LookupHandle {
        self.detail.select(imdb_id).await
    }

    pub async fn close_detail(&self) {
        self.detail.close().await
    }

    pub fn detail(&self) -> &DetailViewer {
        &self.detail
    }

    pub async fn detail_view(&self) -> DetailView {
        self.detail.view(&self.watchlist).await
    }

    pub async fn add_selected_to_watchlist(&mut self) -> Result<bool> {
        self.detail.add_to_watchlist(&mut self.watchlist).await
    }

    pub fn remove_watched(&mut self, imdb_id: &str) -> Result<usize> {
        self.watchlist.remove_watched(imdb_id)
    }

    pub fn watchlist(&self) -> &WatchlistManager {
        &self.watchlist
    }

    pub fn summary(&self) -> WatchlistSummary {
        self.watchlist.summary()
    }

    pub fn title(&self) -> String {
        self.title.get()
    }

    pub fn results_panel(&self) -> Panel {
        self.results_panel
    }

    pub fn watched_panel(&self) -> Panel {
        self.watched_panel
    }

    pub fn toggle_results_panel(&mut self) -> bool {
        self.results_panel.toggle()
    }

    pub fn toggle_watched_panel(&mut self) -> bool {
        self.watched_panel.toggle()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.detail.shutdown();
    }
}
