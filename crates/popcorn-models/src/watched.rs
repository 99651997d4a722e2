use serde::{Deserialize, Serialize};
use crate::movie::MovieDetail;

/// A movie the user has watched and rated.
///
/// Serialized flat: the detail fields keep their OMDb names and the user's
/// rating is stored as `passedRate`, matching the persisted format of
/// earlier watchlists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(flatten)]
    pub movie: MovieDetail,
    #[serde(rename = "passedRate")]
    pub user_rating: u8, // 0-10
}

impl WatchedEntry {
    pub fn new(movie: MovieDetail, user_rating: u8) -> Self {
        Self { movie, user_rating }
    }

    pub fn imdb_id(&self) -> &str {
        &self.movie.imdb_id
    }
}
