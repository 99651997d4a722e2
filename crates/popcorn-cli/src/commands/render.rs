use comfy_table::{Attribute, Cell, Color, Table};
use popcorn_core::WatchlistSummary;
use popcorn_models::{MovieDetail, SearchResultSummary, WatchedEntry};

fn styled_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(header);
    table
}

fn header(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

pub fn results_table(results: &[SearchResultSummary]) -> Table {
    let mut table = styled_table(vec![header("#"), header("Title"), header("Year"), header("IMDb id")]);
    for (i, movie) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(&movie.imdb_id),
        ]);
    }
    table
}

pub fn detail_table(movie: &MovieDetail) -> Table {
    let mut table = styled_table(vec![header(&movie.title), header(&movie.imdb_id)]);
    let rating = format!("⭐ {} IMDb rating", movie.imdb_rating);
    let rows = [
        ("Released", movie.released.as_str()),
        ("Runtime", movie.runtime.as_str()),
        ("Genre", movie.genre.as_str()),
        ("Rating", rating.as_str()),
        ("Plot", movie.plot.as_str()),
        ("Starring", movie.actors.as_str()),
        ("Directed by", movie.director.as_str()),
        ("Poster", movie.poster.as_str()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn watched_table(entries: &[WatchedEntry]) -> Table {
    let mut table = styled_table(vec![
        header("Title"),
        header("IMDb"),
        header("Yours"),
        header("Runtime"),
        header("IMDb id"),
    ]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.movie.title),
            Cell::new(format!("⭐ {}", entry.movie.imdb_rating)),
            Cell::new(format!("🌟 {}", entry.user_rating)),
            Cell::new(&entry.movie.runtime),
            Cell::new(entry.imdb_id()),
        ]);
    }
    table
}

pub fn summary_table(summary: &WatchlistSummary) -> Table {
    let mut table = styled_table(vec![header("Movies you watched"), header("")]);
    table.add_row(vec![Cell::new("#️⃣ Watched"), Cell::new(summary.count_label())]);
    table.add_row(vec![Cell::new("⭐ Avg IMDb rating"), Cell::new(summary.imdb_rating_label())]);
    table.add_row(vec![Cell::new("🌟 Avg your rating"), Cell::new(summary.user_rating_label())]);
    table.add_row(vec![Cell::new("⏳ Avg runtime"), Cell::new(summary.runtime_label())]);
    table
}
