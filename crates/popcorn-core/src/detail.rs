use anyhow::Result;
use popcorn_models::{MovieDetail, WatchedEntry};
use popcorn_sources::MovieDirectory;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use crate::lookup::LookupHandle;
use crate::rating::RatingInput;
use crate::title::{movie_title, TitleBar, LOADING_TITLE};
use crate::watchlist::WatchlistManager;

pub const DETAIL_MAX_RATING: u8 = 10;
pub const DETAIL_ICON_SIZE: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStatus {
    Closed,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailSnapshot {
    pub selected_id: Option<String>,
    pub status: DetailStatus,
    pub movie: Option<MovieDetail>,
    pub error: String,
    /// Value currently shown by the stars (hover preview or committed)
    pub rating: u8,
    pub committed_rating: u8,
}

/// Snapshot joined with the watchlist.
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    #[serde(flatten)]
    pub snapshot: DetailSnapshot,
    /// Stored rating when the selected movie is already on the watchlist
    pub watched_rating: Option<u8>,
    pub can_add: bool,
}

impl DetailView {
    pub fn is_watched(&self) -> bool {
        self.watched_rating.is_some()
    }

    pub fn rated_message(&self) -> Option<String> {
        self.watched_rating
            .map(|rating| format!("You rated this movie with {}", rating))
    }
}

struct DetailInner {
    selected_id: Option<String>,
    status: DetailStatus,
    movie: Option<MovieDetail>,
    error: String,
    rating: RatingInput,
    request: Option<CancellationToken>,
}

impl DetailInner {
    fn closed() -> Self {
        Self {
            selected_id: None,
            status: DetailStatus::Closed,
            movie: None,
            error: String::new(),
            rating: RatingInput::new(DETAIL_MAX_RATING, DETAIL_ICON_SIZE),
            request: None,
        }
    }

    fn cancel_request(&mut self) {
        if let Some(previous) = self.request.take() {
            previous.cancel();
        }
    }
}

/// Shows one selected movie. Cheap to clone; clones share state.
///
/// A newer selection cancels the lookup of the previous one, so a slow
/// response for an old id can never replace the current movie. Every lookup
/// token is a child of one shutdown token shared by all clones.
#[derive(Clone)]
pub struct DetailViewer {
    directory: Arc<dyn MovieDirectory>,
    title: TitleBar,
    inner: Arc<Mutex<DetailInner>>,
    shutdown: CancellationToken,
}

impl DetailViewer {
    pub fn new(directory: Arc<dyn MovieDirectory>, title: TitleBar) -> Self {
        Self {
            directory,
            title,
            inner: Arc::new(Mutex::new(DetailInner::closed())),
            shutdown: CancellationToken::new(),
        }
    }

    /// Cancel any lookup in flight, now and for every later selection.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Toggle: selecting the open id closes the view, any other id opens it.
    pub async fn select(&self, imdb_id: &str) -> LookupHandle {
        let mut inner = self.inner.lock().await;
        if inner.selected_id.as_deref() == Some(imdb_id) {
            self.close_locked(&mut inner);
            return LookupHandle::settled_now();
        }
        self.start_lookup(&mut inner, imdb_id)
    }

    /// Open `imdb_id` regardless of the current selection.
    pub async fn open(&self, imdb_id: &str) -> LookupHandle {
        let mut inner = self.inner.lock().await;
        self.start_lookup(&mut inner, imdb_id)
    }

    /// Close the view and restore the default title.
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        self.close_locked(&mut inner);
    }

    fn close_locked(&self, inner: &mut DetailInner) {
        if let Some(id) = inner.selected_id.as_deref() {
            debug!(imdb_id = id, "Closing detail view");
        }
        inner.cancel_request();
        *inner = DetailInner::closed();
        self.title.reset();
    }

    fn start_lookup(&self, inner: &mut DetailInner, imdb_id: &str) -> LookupHandle {
        inner.cancel_request();
        let token = self.shutdown.child_token();
        inner.request = Some(token.clone());
        inner.selected_id = Some(imdb_id.to_string());
        inner.status = DetailStatus::Loading;
        inner.movie = None;
        inner.error.clear();
        inner.rating.reset();
        self.title.set(LOADING_TITLE);

        let directory = self.directory.clone();
        let state = self.inner.clone();
        let title = self.title.clone();
        let imdb_id = imdb_id.to_string();

        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(imdb_id = %imdb_id, "Detail lookup cancelled");
                    return;
                }
                outcome = directory.get_movie(&imdb_id) => outcome,
            };

            let mut inner = state.lock().await;
            if token.is_cancelled() {
                debug!(imdb_id = %imdb_id, "Discarding superseded detail response");
                return;
            }
            inner.request = None;

            match outcome {
                Ok(movie) => {
                    info!(imdb_id = %imdb_id, title = %movie.title, "Loaded movie detail");
                    if movie.title.is_empty() {
                        title.set(LOADING_TITLE);
                    } else {
                        title.set(&movie_title(&movie.title));
                    }
                    inner.movie = Some(movie);
                    inner.status = DetailStatus::Loaded;
                }
                Err(e) => {
                    warn!(imdb_id = %imdb_id, error = %e, "Detail lookup failed");
                    inner.error = e.user_message().to_string();
                    inner.status = DetailStatus::Error;
                    title.reset();
                }
            }
        });

        LookupHandle::spawned(task)
    }

    pub async fn selected_id(&self) -> Option<String> {
        self.inner.lock().await.selected_id.clone()
    }

    pub async fn snapshot(&self) -> DetailSnapshot {
        let inner = self.inner.lock().await;
        DetailSnapshot {
            selected_id: inner.selected_id.clone(),
            status: inner.status,
            movie: inner.movie.clone(),
            error: inner.error.clone(),
            rating: inner.rating.displayed(),
            committed_rating: inner.rating.committed(),
        }
    }

    pub async fn view(&self, watchlist: &WatchlistManager) -> DetailView {
        let snapshot = self.snapshot().await;
        let watched_rating = snapshot
            .selected_id
            .as_deref()
            .and_then(|id| watchlist.find(id))
            .map(|entry| entry.user_rating);
        let can_add = snapshot.status == DetailStatus::Loaded
            && watched_rating.is_none()
            && snapshot.committed_rating > 0;

        DetailView {
            snapshot,
            watched_rating,
            can_add,
        }
    }

    /// Star strip for the current rating state.
    pub async fn render_rating(&self) -> String {
        self.inner.lock().await.rating.render()
    }

    pub async fn hover_rating(&self, index: u8) -> bool {
        let mut inner = self.inner.lock().await;
        inner.status == DetailStatus::Loaded && inner.rating.hover(index)
    }

    pub async fn leave_rating(&self) {
        self.inner.lock().await.rating.leave();
    }

    /// Commit a rating for the loaded movie.
    pub async fn rate(&self, index: u8) -> Option<u8> {
        let mut inner = self.inner.lock().await;
        if inner.status != DetailStatus::Loaded {
            return None;
        }
        inner.rating.click(index)
    }

    /// Append the loaded movie with its committed rating, then close the view.
    ///
    /// Returns `Ok(false)` without touching the watchlist when nothing is
    /// loaded, no rating was committed, or the movie is already watched.
    pub async fn add_to_watchlist(&self, watchlist: &mut WatchlistManager) -> Result<bool> {
        let entry = {
            let inner = self.inner.lock().await;
            let (Some(id), Some(movie)) = (inner.selected_id.as_deref(), inner.movie.as_ref()) else {
                return Ok(false);
            };
            let rating = inner.rating.committed();
            if inner.status != DetailStatus::Loaded || rating == 0 || watchlist.contains(id) {
                return Ok(false);
            }
            WatchedEntry::new(movie.clone(), rating)
        };

        watchlist.add_watched(entry)?;
        self.close().await;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::WatchlistRepository;
    use crate::store::MemoryKeyValueStore;
    use crate::test_support::{detail, FlakyStore, GatedDirectory, StaticDirectory};
    use crate::title::DEFAULT_TITLE;

    fn heat() -> MovieDetail {
        detail("tt0113277", "Heat", "8.3", "170 min")
    }

    fn watchlist() -> WatchlistManager {
        WatchlistManager::load(WatchlistRepository::new(Arc::new(MemoryKeyValueStore::new())))
    }

    fn viewer(directory: Arc<dyn MovieDirectory>) -> (DetailViewer, TitleBar) {
        let title = TitleBar::new();
        (DetailViewer::new(directory, title.clone()), title)
    }

    #[tokio::test]
    async fn test_open_loads_detail_and_sets_title() {
        let directory = Arc::new(StaticDirectory::new().with_movie(heat()));
        let (viewer, title) = viewer(directory.clone());

        let handle = viewer.select("tt0113277").await;
        assert_eq!(title.get(), LOADING_TITLE);
        handle.settled().await;

        let snapshot = viewer.snapshot().await;
        assert_eq!(snapshot.status, DetailStatus::Loaded);
        assert_eq!(snapshot.movie.unwrap().title, "Heat");
        assert_eq!(title.get(), "Movie | Heat");
        assert_eq!(directory.detail_calls(), 1);
    }

    #[tokio::test]
    async fn test_selecting_same_id_toggles_closed() {
        let directory = Arc::new(StaticDirectory::new().with_movie(heat()));
        let (viewer, title) = viewer(directory.clone());

        viewer.select("tt0113277").await.settled().await;
        viewer.select("tt0113277").await.settled().await;

        assert_eq!(viewer.selected_id().await, None);
        assert_eq!(viewer.snapshot().await.status, DetailStatus::Closed);
        assert_eq!(title.get(), DEFAULT_TITLE);
        assert_eq!(directory.detail_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_shows_generic_error() {
        let (viewer, title) = viewer(Arc::new(StaticDirectory::offline()));
        viewer.select("tt0113277").await.settled().await;

        let snapshot = viewer.snapshot().await;
        assert_eq!(snapshot.status, DetailStatus::Error);
        assert_eq!(snapshot.error, "Movie not found or something went wrong !!");
        assert!(snapshot.movie.is_none());
        assert_eq!(title.get(), DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn test_superseded_detail_response_is_discarded() {
        let directory = Arc::new(GatedDirectory::new());
        let first = directory.gate_movie("tt0000001");
        let second = directory.gate_movie("tt0113277");
        let (viewer, title) = viewer(directory.clone());

        let first_handle = viewer.select("tt0000001").await;
        let second_handle = viewer.select("tt0113277").await;

        second.send(Ok(heat())).unwrap();
        second_handle.settled().await;

        // The older lookup resolving later must not win
        let _ = first.send(Ok(detail("tt0000001", "Old", "5.0", "90 min")));
        first_handle.settled().await;

        let snapshot = viewer.snapshot().await;
        assert_eq!(snapshot.selected_id.as_deref(), Some("tt0113277"));
        assert_eq!(snapshot.movie.unwrap().title, "Heat");
        assert_eq!(title.get(), "Movie | Heat");
    }

    #[tokio::test]
    async fn test_rating_requires_loaded_movie() {
        let directory = Arc::new(GatedDirectory::new());
        let gate = directory.gate_movie("tt0113277");
        let (viewer, _title) = viewer(directory.clone());

        let handle = viewer.select("tt0113277").await;
        assert_eq!(viewer.rate(8).await, None);
        assert!(!viewer.hover_rating(8).await);

        gate.send(Ok(heat())).unwrap();
        handle.settled().await;

        assert!(viewer.hover_rating(3).await);
        assert_eq!(viewer.snapshot().await.rating, 3);
        assert_eq!(viewer.snapshot().await.committed_rating, 0);
        viewer.leave_rating().await;
        assert_eq!(viewer.rate(8).await, Some(8));
        assert_eq!(viewer.render_rating().await, "★★★★★★★★☆☆ 8");
    }

    #[tokio::test]
    async fn test_add_to_watchlist_appends_and_closes() {
        let directory = Arc::new(StaticDirectory::new().with_movie(heat()));
        let (viewer, title) = viewer(directory);
        let mut watchlist = watchlist();

        viewer.select("tt0113277").await.settled().await;

        // Nothing committed yet
        assert!(!viewer.view(&watchlist).await.can_add);
        assert!(!viewer.add_to_watchlist(&mut watchlist).await.unwrap());
        assert!(watchlist.is_empty());

        viewer.rate(9).await;
        assert!(viewer.view(&watchlist).await.can_add);
        assert!(viewer.add_to_watchlist(&mut watchlist).await.unwrap());

        assert_eq!(watchlist.len(), 1);
        assert_eq!(watchlist.entries()[0].user_rating, 9);
        assert_eq!(watchlist.entries()[0].movie.title, "Heat");
        assert_eq!(viewer.selected_id().await, None);
        assert_eq!(title.get(), DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn test_watched_movie_shows_stored_rating() {
        let directory = Arc::new(StaticDirectory::new().with_movie(heat()));
        let (viewer, _title) = viewer(directory);
        let mut watchlist = watchlist();
        watchlist.add_watched(WatchedEntry::new(heat(), 6)).unwrap();

        viewer.select("tt0113277").await.settled().await;
        viewer.rate(10).await;

        let view = viewer.view(&watchlist).await;
        assert!(view.is_watched());
        assert!(!view.can_add);
        assert_eq!(view.rated_message().as_deref(), Some("You rated this movie with 6"));

        assert!(!viewer.add_to_watchlist(&mut watchlist).await.unwrap());
        assert_eq!(watchlist.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_add_available() {
        let directory = Arc::new(StaticDirectory::new().with_movie(heat()));
        let (viewer, _title) = viewer(directory);
        let store = Arc::new(FlakyStore::new());
        let mut watchlist = WatchlistManager::load(WatchlistRepository::new(store.clone()));

        viewer.select("tt0113277").await.settled().await;
        viewer.rate(8).await;

        store.fail_writes(true);
        assert!(viewer.add_to_watchlist(&mut watchlist).await.is_err());

        // Not saved, so not shown as watched and still open for another try
        let view = viewer.view(&watchlist).await;
        assert!(!view.is_watched());
        assert!(view.can_add);
        assert_eq!(view.snapshot.selected_id.as_deref(), Some("tt0113277"));

        store.fail_writes(false);
        assert!(viewer.add_to_watchlist(&mut watchlist).await.unwrap());
        assert_eq!(watchlist.find("tt0113277").unwrap().user_rating, 8);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_lookup() {
        let directory = Arc::new(GatedDirectory::new());
        let gate = directory.gate_movie("tt0113277");
        let (viewer, _title) = viewer(directory.clone());

        let handle = viewer.select("tt0113277").await;
        viewer.shutdown();
        // Settles without the gate ever being released
        handle.settled().await;

        let _ = gate.send(Ok(heat()));
        let snapshot = viewer.snapshot().await;
        assert_eq!(snapshot.status, DetailStatus::Loading);
        assert!(snapshot.movie.is_none());
    }
}
