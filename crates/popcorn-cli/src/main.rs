use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, clear, config, movie, watched};
use popcorn_config::{Config, PathManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Popcorn Movies - search movies and keep a rated watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    Search {
        /// Title to search for
        query: String,
    },
    /// Show details of one movie
    Show {
        /// IMDb id, e.g. tt0372784
        imdb_id: String,
    },
    /// Rate a movie and add it to the watched list
    Add {
        /// IMDb id, e.g. tt0372784
        imdb_id: String,

        /// Your rating
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// Remove a movie from the watched list
    Remove {
        /// IMDb id, e.g. tt0372784
        imdb_id: String,
    },
    /// Show the watched list and its statistics
    Watched,
    /// Interactive search, rate and watchlist session
    #[command(long_about = "Start an interactive session: type a query, pick a result to see its details, rate it with stars and add it to your watched list.")]
    Browse,
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored data
    Clear {
        /// Delete the stored watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the config and data paths
    Path,
}

impl Commands {
    /// Commands that repair or locate the config file, so they must run even when it is broken
    fn tolerates_broken_config(&self) -> bool {
        matches!(
            self,
            Commands::Config {
                cmd: Some(ConfigCommands::Init { .. } | ConfigCommands::Path)
            }
        )
    }
}

/// Load the config for `command`. A broken file falls back to defaults (with
/// the reason returned as a warning) only for commands that tolerate it.
fn load_config(paths: &PathManager, command: &Commands) -> color_eyre::Result<(Config, Option<String>)> {
    let config_file = paths.config_file();
    match Config::load_or_default(&config_file) {
        Ok(config) => Ok((config, None)),
        Err(e) if command.tolerates_broken_config() => Ok((
            Config::default(),
            Some(format!("Ignoring invalid config at {}: {}", config_file.display(), e)),
        )),
        Err(e) => Err(color_eyre::eyre::eyre!(
            "Failed to load config from {}: {}. Fix it or run 'popcorn config init --force'",
            config_file.display(),
            e
        )),
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let (config, config_warning) = load_config(&paths, &cli.command)?;

    let log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    logging::init_logging(cli.verbose, cli.quiet, &config.logging, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    if let Some(warning) = config_warning {
        output.warn(warning);
    }

    match cli.command {
        Commands::Search { query } => movie::run_search(&config, &paths, &query, &output).await,
        Commands::Show { imdb_id } => movie::run_show(&config, &paths, &imdb_id, &output).await,
        Commands::Add { imdb_id, rating } => movie::run_add(&config, &paths, &imdb_id, rating, &output).await,
        Commands::Remove { imdb_id } => watched::run_remove(&paths, &imdb_id, &output),
        Commands::Watched => watched::run_watched(&paths, &output),
        Commands::Browse => browse::run_browse(&config, &paths, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &config, &paths, &output)
        }
        Commands::Clear { watchlist, yes } => clear::run_clear(watchlist, yes, &paths, &output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_with_config(content: &str) -> (tempfile::TempDir, PathManager) {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        std::fs::write(paths.config_file(), content).unwrap();
        (dir, paths)
    }

    fn command(args: &[&str]) -> Commands {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_invalid_config_still_allows_init_and_path() {
        let (_dir, paths) = paths_with_config("[omdb]\ntimeout_seconds = 0\n");

        for args in [&["popcorn", "config", "init", "--force"][..], &["popcorn", "config", "path"][..]] {
            let (config, warning) = load_config(&paths, &command(args)).unwrap();
            assert_eq!(config.omdb.timeout_seconds, 10);
            assert!(warning.unwrap().contains("Ignoring invalid config"));
        }
    }

    #[test]
    fn test_invalid_config_blocks_lookups() {
        let (_dir, paths) = paths_with_config("[omdb]\nbase_url = \"ftp://omdb\"\n");
        assert!(load_config(&paths, &command(&["popcorn", "search", "batman"])).is_err());
        assert!(load_config(&paths, &command(&["popcorn", "config", "show"])).is_err());
    }

    #[test]
    fn test_unparseable_config_still_allows_init() {
        let (_dir, paths) = paths_with_config("not = [valid toml");
        let (_config, warning) = load_config(&paths, &command(&["popcorn", "config", "init", "--force"])).unwrap();
        assert!(warning.is_some());
    }
}
