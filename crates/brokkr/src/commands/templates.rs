//! `brokkr templates` command handler

use anyhow::Result;
use brokkr_scaffold::config::ConfigFile;
use camino::Utf8Path;

use crate::cli::TemplatesArgs;
use crate::output;

/// List the templates configured in brokkr.toml
pub fn run(args: TemplatesArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config_file = match config_path {
        Some(path) => ConfigFile::from_path(path),
        None => ConfigFile::load(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(config_file.templates())?);
        return Ok(());
    }

    if !config_file.loaded() {
        output::warning("No brokkr.toml loaded");
    }

    if config_file.templates().is_empty() {
        output::info("No templates configured");
        return Ok(());
    }

    output::header("Templates");
    for (name, source) in config_file.templates() {
        output::kv(name, source);
    }

    Ok(())
}
