pub mod client;
pub mod parser;

pub use client::OmdbClient;
pub use parser::{parse_detail_response, parse_search_response};
