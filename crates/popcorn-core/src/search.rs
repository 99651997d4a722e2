use popcorn_models::SearchResultSummary;
use popcorn_sources::{MovieDirectory, USER_FACING_ERROR};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use crate::detail::DetailViewer;
use crate::lookup::LookupHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchState {
    pub query: String,
    pub status: SearchStatus,
    pub results: Vec<SearchResultSummary>,
    pub error: String,
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    pub fn count_label(&self) -> String {
        format!("Found {} results", self.results.len())
    }
}

struct SearchInner {
    state: SearchState,
    request: Option<CancellationToken>,
}

/// Owns the query and runs one lookup per query change.
///
/// Only the newest query may commit: each lookup carries a cancellation
/// token that the next `set_query` cancels, and the commit re-checks the
/// token under the state lock. Dropping the controller cancels whatever is
/// still in flight.
pub struct SearchController {
    directory: Arc<dyn MovieDirectory>,
    detail: DetailViewer,
    inner: Arc<Mutex<SearchInner>>,
    shutdown: CancellationToken,
}

impl SearchController {
    pub fn new(directory: Arc<dyn MovieDirectory>, detail: DetailViewer) -> Self {
        Self {
            directory,
            detail,
            inner: Arc::new(Mutex::new(SearchInner {
                state: SearchState::default(),
                request: None,
            })),
            shutdown: CancellationToken::new(),
        }
    }

    /// Replace the query and start a lookup cycle for it.
    pub async fn set_query(&self, text: impl Into<String>) -> LookupHandle {
        let query = text.into();

        if query.is_empty() {
            {
                let mut inner = self.inner.lock().await;
                if let Some(previous) = inner.request.take() {
                    previous.cancel();
                }
                inner.state = SearchState::default();
            }
            self.detail.close().await;
            debug!("Query cleared");
            return LookupHandle::settled_now();
        }

        self.detail.close().await;

        let mut inner = self.inner.lock().await;
        if let Some(previous) = inner.request.take() {
            previous.cancel();
        }
        let token = self.shutdown.child_token();
        inner.request = Some(token.clone());
        inner.state.query = query.clone();
        inner.state.error.clear();
        inner.state.status = SearchStatus::Loading;
        drop(inner);

        let directory = self.directory.clone();
        let state = self.inner.clone();

        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(query = %query, "Search cancelled");
                    return;
                }
                outcome = directory.search(&query) => outcome,
            };

            let mut inner = state.lock().await;
            if token.is_cancelled() {
                debug!(query = %query, "Discarding superseded search response");
                return;
            }
            inner.request = None;

            match outcome {
                Ok(results) if !results.is_empty() => {
                    info!(query = %query, count = results.len(), "Search settled");
                    inner.state.results = results;
                    inner.state.error.clear();
                    inner.state.status = SearchStatus::Success;
                }
                Ok(_) => {
                    warn!(query = %query, "Search returned no results");
                    inner.state.results.clear();
                    inner.state.error = USER_FACING_ERROR.to_string();
                    inner.state.status = SearchStatus::Error;
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "Search failed");
                    inner.state.results.clear();
                    inner.state.error = e.user_message().to_string();
                    inner.state.status = SearchStatus::Error;
                }
            }
        });

        LookupHandle::spawned(task)
    }

    pub async fn state(&self) -> SearchState {
        self.inner.lock().await.state.clone()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
