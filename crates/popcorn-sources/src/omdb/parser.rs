use popcorn_models::{MovieDetail, SearchResultSummary};
use serde::Deserialize;
use tracing::debug;
use crate::error::DirectoryError;

/// Status envelope present on every OMDb response.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "Search", default)]
    search: Vec<SearchResultSummary>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

fn check_envelope(body: &str) -> Result<(), DirectoryError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.response == "True" {
        return Ok(());
    }
    Err(DirectoryError::NotFound(
        envelope.error.unwrap_or_else(|| format!("Response was {:?}", envelope.response)),
    ))
}

/// Interpret the body of a `?s=` request.
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResultSummary>, DirectoryError> {
    check_envelope(body)?;

    let parsed: SearchBody = serde_json::from_str(body)?;
    debug!(
        returned = parsed.search.len(),
        total = parsed.total_results.as_deref().unwrap_or("?"),
        "Parsed search response"
    );

    if parsed.search.is_empty() {
        return Err(DirectoryError::NotFound("empty result set".to_string()));
    }
    Ok(parsed.search)
}

/// Interpret the body of an `?i=` request.
pub fn parse_detail_response(body: &str) -> Result<MovieDetail, DirectoryError> {
    check_envelope(body)?;
    let detail: MovieDetail = serde_json::from_str(body)?;
    Ok(detail)
}
