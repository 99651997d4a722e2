use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use popcorn_config::{Config, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, config, paths, output),
        crate::ConfigCommands::Init { force } => init_config(force, paths, output),
        crate::ConfigCommands::Path => show_paths(paths, output),
    }
}

/// Shows the effective configuration (file values plus environment overrides)
fn show_config(full: bool, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let api_key = if full { config.omdb.api_key.clone() } else { config.masked_api_key() };
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                output.warn(format!("No config file at {}, using defaults", config_file.display()));
                output.info("Create one with: popcorn config init");
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Configuration").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
                Cell::new(config_file.display().to_string()),
            ]);
            table.add_row(vec![Cell::new("OMDb API key"), Cell::new(api_key)]);
            table.add_row(vec![Cell::new("OMDb base URL"), Cell::new(&config.omdb.base_url)]);
            table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", config.omdb.timeout_seconds))]);
            table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
            table.add_row(vec![
                Cell::new("JSON logs"),
                Cell::new(if config.logging.json { "✓".green().to_string() } else { "✗".red().to_string() }),
            ]);
            table.add_row(vec![
                Cell::new("Log file"),
                Cell::new(log_file.unwrap_or_else(|| "<stderr>".to_string())),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "config_file_exists": config_file.exists(),
                "omdb": {
                    "api_key": api_key,
                    "base_url": config.omdb.base_url,
                    "timeout_seconds": config.omdb.timeout_seconds,
                },
                "logging": {
                    "level": config.logging.level,
                    "json": config.logging.json,
                    "file": log_file,
                },
            }));
        }
    }

    Ok(())
}

fn init_config(force: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();

    if config_file.exists() && !force {
        output.warn(format!("Config file already exists at {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults");
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn show_paths(paths: &PathManager, output: &Output) -> Result<()> {
    if output.is_human() {
        output.println(format!("Config file: {}", paths.config_file().display()));
        output.println(format!("Storage:     {}", paths.storage_dir().display()));
        output.println(format!("Logs:        {}", paths.log_dir().display()));
    } else {
        output.json(&json!({
            "config_file": paths.config_file().display().to_string(),
            "storage_dir": paths.storage_dir().display().to_string(),
            "log_dir": paths.log_dir().display().to_string(),
        }));
    }
    Ok(())
}
