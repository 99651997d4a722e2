use anyhow::Result;
use popcorn_config::LoggingConfig;
use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Build the filter from CLI flags, falling back to `RUST_LOG`, then the configured level
fn build_filter(verbose_level: u8, quiet: bool, configured_level: &str) -> EnvFilter {
    if quiet {
        // In quiet mode, only show errors
        return EnvFilter::new("error");
    }

    match verbose_level {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(configured_level)),
        // -v: debug level but suppress noisy hyper logs
        1 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug,hyper::proto::h1=warn,hyper::client::pool=warn")),
        _ => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("trace")),
    }
}

pub fn init_logging(
    verbose_level: u8,
    quiet: bool,
    config: &LoggingConfig,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let filter = build_filter(verbose_level, quiet, &config.level);

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| config.json || !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    if let Some(log_path) = log_file {
        let log_dir = log_path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&log_dir)?;

        let log_filename = log_path.file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

        // Rotation prefix without extension ("popcorn" from "popcorn.log")
        let log_prefix = log_filename
            .rsplit_once('.')
            .map(|(prefix, _)| prefix)
            .unwrap_or(log_filename);

        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);

            registry.with(json_layer).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);

            registry.with(fmt_layer).init();
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(fmt_layer).init();
    }

    Ok(())
}
