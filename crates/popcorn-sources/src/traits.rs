use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultSummary};
use crate::error::DirectoryError;

/// A remote movie directory that can be searched by title and queried by id.
#[async_trait]
pub trait MovieDirectory: Send + Sync {
    // Source metadata
    fn source_name(&self) -> &str;

    /// Search titles. An empty result is reported as `DirectoryError::NotFound`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResultSummary>, DirectoryError>;

    /// Fetch the full record for one id.
    async fn get_movie(&self, imdb_id: &str) -> Result<MovieDetail, DirectoryError>;
}
