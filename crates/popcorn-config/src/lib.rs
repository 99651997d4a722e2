pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, OmdbConfig, DEFAULT_OMDB_API_KEY, DEFAULT_OMDB_BASE_URL};
pub use paths::{PathManager, container_base_path};
