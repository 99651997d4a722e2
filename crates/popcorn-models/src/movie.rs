use serde::{Deserialize, Serialize};

/// One row of a title search. Field names follow the OMDb wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String, // Free text, e.g. "2005" or "2011–2019"
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

/// Full record for a single title.
///
/// OMDb reports missing values as the literal string `"N/A"`, so every field
/// is kept as text and the numeric ones are parsed on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String, // "140 min"
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String, // "8.2" or "N/A"
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Director", default)]
    pub director: String,
}

impl MovieDetail {
    /// IMDb rating as a number, `None` when absent or not numeric.
    pub fn external_rating(&self) -> Option<f64> {
        self.imdb_rating.trim().parse::<f64>().ok().filter(|r| r.is_finite())
    }

    /// Leading integer of the runtime text ("140 min" -> 140).
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime.split_whitespace().next()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_uses_omdb_field_names() {
        let json = r#"{"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Type":"movie","Poster":"https://example.com/p.jpg"}"#;
        let summary: SearchResultSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.imdb_id, "tt0372784");
        assert_eq!(summary.title, "Batman Begins");
        assert_eq!(summary.year, "2005");
    }

    #[test]
    fn test_external_rating_parsing() {
        let mut detail = MovieDetail {
            imdb_rating: "8.2".to_string(),
            ..MovieDetail::default()
        };
        assert_eq!(detail.external_rating(), Some(8.2));

        detail.imdb_rating = "N/A".to_string();
        assert_eq!(detail.external_rating(), None);
    }

    #[test]
    fn test_runtime_minutes_parsing() {
        let mut detail = MovieDetail {
            runtime: "140 min".to_string(),
            ..MovieDetail::default()
        };
        assert_eq!(detail.runtime_minutes(), Some(140));

        detail.runtime = "N/A".to_string();
        assert_eq!(detail.runtime_minutes(), None);

        detail.runtime = String::new();
        assert_eq!(detail.runtime_minutes(), None);
    }
}
