pub mod detail;
pub mod lookup;
pub mod panel;
pub mod rating;
pub mod repository;
pub mod search;
pub mod session;
pub mod stats;
pub mod store;
pub mod title;
pub mod watchlist;

#[cfg(test)]
mod test_support;

pub use detail::{DetailSnapshot, DetailStatus, DetailView, DetailViewer};
pub use lookup::LookupHandle;
pub use panel::Panel;
pub use rating::RatingInput;
pub use repository::{WatchlistRepository, WATCHLIST_KEY};
pub use search::{SearchController, SearchState, SearchStatus};
pub use session::Session;
pub use stats::{average, format_average, WatchlistSummary};
pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use title::{movie_title, TitleBar, DEFAULT_TITLE, LOADING_TITLE};
pub use watchlist::WatchlistManager;
