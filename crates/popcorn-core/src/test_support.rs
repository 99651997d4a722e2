//! In-memory directories and stores for controller tests.

use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultSummary};
use popcorn_sources::{DirectoryError, MovieDirectory};
use crate::store::{KeyValueStore, MemoryKeyValueStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn summary(imdb_id: &str, title: &str, year: &str) -> SearchResultSummary {
    SearchResultSummary {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: year.to_string(),
        poster: "N/A".to_string(),
    }
}

pub fn detail(imdb_id: &str, title: &str, imdb_rating: &str, runtime: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        imdb_rating: imdb_rating.to_string(),
        runtime: runtime.to_string(),
        ..MovieDetail::default()
    }
}

/// Answers immediately from fixed tables and counts calls.
#[derive(Default)]
pub struct StaticDirectory {
    searches: HashMap<String, Vec<SearchResultSummary>>,
    movies: HashMap<String, MovieDetail>,
    failing: bool,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lookup fails with a transport error
    pub fn offline() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub fn with_search(mut self, query: &str, results: Vec<SearchResultSummary>) -> Self {
        self.searches.insert(query.to_string(), results);
        self
    }

    pub fn with_movie(mut self, movie: MovieDetail) -> Self {
        self.movies.insert(movie.imdb_id.clone(), movie);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieDirectory for StaticDirectory {
    fn source_name(&self) -> &str {
        "static"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultSummary>, DirectoryError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(DirectoryError::Network("offline".to_string()));
        }
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound("Movie not found!".to_string()))
    }

    async fn get_movie(&self, imdb_id: &str) -> Result<MovieDetail, DirectoryError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(DirectoryError::Network("offline".to_string()));
        }
        self.movies
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound("Incorrect IMDb ID.".to_string()))
    }
}

type SearchGate = oneshot::Receiver<Result<Vec<SearchResultSummary>, DirectoryError>>;
type MovieGate = oneshot::Receiver<Result<MovieDetail, DirectoryError>>;

/// Each lookup blocks until the test releases it through the matching sender.
#[derive(Default)]
pub struct GatedDirectory {
    searches: Mutex<HashMap<String, SearchGate>>,
    movies: Mutex<HashMap<String, MovieGate>>,
}

impl GatedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate_search(&self, query: &str) -> oneshot::Sender<Result<Vec<SearchResultSummary>, DirectoryError>> {
        let (tx, rx) = oneshot::channel();
        self.searches.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    pub fn gate_movie(&self, imdb_id: &str) -> oneshot::Sender<Result<MovieDetail, DirectoryError>> {
        let (tx, rx) = oneshot::channel();
        self.movies.lock().unwrap().insert(imdb_id.to_string(), rx);
        tx
    }
}

#[async_trait]
impl MovieDirectory for GatedDirectory {
    fn source_name(&self) -> &str {
        "gated"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultSummary>, DirectoryError> {
        let gate = self.searches.lock().unwrap().remove(query);
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(DirectoryError::Network("gate dropped".to_string()))),
            None => Err(DirectoryError::NotFound("no gate".to_string())),
        }
    }

    async fn get_movie(&self, imdb_id: &str) -> Result<MovieDetail, DirectoryError> {
        let gate = self.movies.lock().unwrap().remove(imdb_id);
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(DirectoryError::Network("gate dropped".to_string()))),
            None => Err(DirectoryError::NotFound("no gate".to_string())),
        }
    }
}

/// Memory store whose writes can be switched to fail, like a full disk.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryKeyValueStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("disk full"));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.inner.remove(key)
    }
}
