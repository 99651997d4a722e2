use popcorn_models::WatchedEntry;
use serde::Serialize;

/// Aggregates over the watchlist. Means are `NaN` for an empty watchlist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WatchlistSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchlistSummary {
    /// Unparseable IMDb ratings and runtimes count as 0.
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        let imdb: Vec<f64> = entries
            .iter()
            .map(|e| e.movie.external_rating().unwrap_or(0.0))
            .collect();
        let user: Vec<f64> = entries.iter().map(|e| f64::from(e.user_rating)).collect();
        let runtime: Vec<f64> = entries
            .iter()
            .map(|e| f64::from(e.movie.runtime_minutes().unwrap_or(0)))
            .collect();

        Self {
            count: entries.len(),
            avg_imdb_rating: average(&imdb),
            avg_user_rating: average(&user),
            avg_runtime: average(&runtime),
        }
    }

    pub fn imdb_rating_label(&self) -> String {
        format_average(self.avg_imdb_rating)
    }

    pub fn user_rating_label(&self) -> String {
        format_average(self.avg_user_rating)
    }

    pub fn runtime_label(&self) -> String {
        format!("{} min", format_average(self.avg_runtime))
    }

    pub fn count_label(&self) -> String {
        format!("{} movies", self.count)
    }
}

/// Arithmetic mean; `NaN` for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// One decimal place, or `-` when the mean is undefined.
pub fn format_average(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popcorn_models::MovieDetail;

    fn watched(imdb_rating: &str, user_rating: u8, runtime: &str) -> WatchedEntry {
        WatchedEntry::new(
            MovieDetail {
                imdb_id: format!("tt{}{}", user_rating, runtime.len()),
                imdb_rating: imdb_rating.to_string(),
                runtime: runtime.to_string(),
                ..MovieDetail::default()
            },
            user_rating,
        )
    }

    #[test]
    fn test_summary_of_two_entries() {
        let entries = vec![watched("8.0", 7, "140 min"), watched("7.0", 9, "100 min")];
        let summary = WatchlistSummary::from_entries(&entries);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.imdb_rating_label(), "7.5");
        assert_eq!(summary.user_rating_label(), "8.0");
        assert_eq!(format_average(summary.avg_runtime), "120.0");
        assert_eq!(summary.runtime_label(), "120.0 min");
        assert_eq!(summary.count_label(), "2 movies");
    }

    #[test]
    fn test_unparseable_fields_count_as_zero() {
        let entries = vec![watched("N/A", 4, "N/A"), watched("6.0", 6, "90 min")];
        let summary = WatchlistSummary::from_entries(&entries);

        assert_eq!(summary.imdb_rating_label(), "3.0");
        assert_eq!(summary.user_rating_label(), "5.0");
        assert_eq!(format_average(summary.avg_runtime), "45.0");
    }

    #[test]
    fn test_empty_watchlist_has_undefined_means() {
        let summary = WatchlistSummary::from_entries(&[]);
        assert_eq!(summary.count, 0);
        assert!(summary.avg_imdb_rating.is_nan());
        assert!(summary.avg_user_rating.is_nan());
        assert!(summary.avg_runtime.is_nan());
        assert_eq!(summary.imdb_rating_label(), "-");
        assert_eq!(summary.runtime_label(), "- min");
    }
}
