pub mod movie;
pub mod watched;

pub use movie::{MovieDetail, SearchResultSummary};
pub use watched::WatchedEntry;
