//! `brokkr new` command handler

use anyhow::{Context, Result};
use brokkr_scaffold::config::{ConfigFile, ScaffoldConfig};
use brokkr_scaffold::error::Error;
use brokkr_scaffold::materialize::{self, Materializer};
use brokkr_scaffold::vcs::{self, ClonedTemplate, TemplateSource};
use camino::{Utf8Path, Utf8PathBuf};
use dialoguer::Select;

use crate::cli::NewArgs;
use crate::output;

/// Create a new project from a template
pub async fn run(args: NewArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    output::header("Create New Project");

    let config_file = match config_path {
        Some(path) => ConfigFile::from_path(path),
        None => ConfigFile::load(),
    };
    if let Some(path) = config_file.path() {
        output::info(&format!("Loaded {}", path));
    }

    let template = resolve_template(&args, &config_file)?;
    tracing::debug!("Resolved template identifier: {}", template);

    let config = ScaffoldConfig::new(args.name.as_str(), &template)?;
    let config = match &args.vars {
        Some(vars) => config.with_variables(vars),
        None => config,
    };
    let config = match &args.settings_dir {
        Some(dir) => config.with_settings_dir(dir.as_str()),
        None => config,
    };
    let config = config.with_ignore(
        config_file
            .ignore()
            .iter()
            .chain(args.ignore.iter())
            .cloned(),
    );

    output::kv("Project name", &args.name);
    output::kv("Template", &template);
    println!();

    // Remote sources are cloned first; the tempdir guard must outlive
    // materialization
    let mut cloned: Option<ClonedTemplate> = None;
    let source_path: Utf8PathBuf = match config.source() {
        TemplateSource::Local(path) => path.clone(),
        TemplateSource::Vcs { kind, url } => {
            let pb = output::spinner(&format!("Cloning {} template...", kind));
            let result = vcs::clone_to_temp(*kind, url).await;
            pb.finish_and_clear();
            let template = result.context("Failed to fetch template")?;
            let path = template.path().to_owned();
            cloned = Some(template);
            path
        }
    };

    if materialize::has_pipeline_file(&source_path) {
        output::info("Template provides a pipeline file; it is not copied into the project");
    }

    let materializer = Materializer::new(&config);
    let project_root = materializer.run(&source_path, &args.directory)?;

    drop(cloned);

    println!();
    output::success(&format!("Project '{}' created successfully", args.name));
    println!();
    output::kv("Location", project_root.as_str());

    println!();
    output::info("Next steps:");
    println!("   1. cd {}", project_root);
    println!("   2. Review the generated files");

    Ok(())
}

/// Resolve the template identifier for this run
///
/// Precedence: explicit `--template` path/URI, then `--template-name`
/// config lookup, then interactive `--select`, then the config file's
/// default (explicit `[defaults] template` or a sole entry).
fn resolve_template(args: &NewArgs, config_file: &ConfigFile) -> Result<String> {
    if let Some(template) = &args.template {
        return Ok(template.clone());
    }

    if let Some(name) = &args.template_name {
        return match config_file.get(name) {
            Some(source) => Ok(source.to_string()),
            None => Err(Error::template_not_found(name).into()),
        };
    }

    if args.select {
        return select_template(config_file);
    }

    match config_file.default_template() {
        Some(source) => Ok(source.to_string()),
        None => Err(Error::NoTemplate.into()),
    }
}

/// Prompt the user to choose one of the configured templates
fn select_template(config_file: &ConfigFile) -> Result<String> {
    let entries: Vec<(&str, &str)> = config_file
        .templates()
        .iter()
        .map(|(name, source)| (name.as_str(), source.as_str()))
        .collect();

    if entries.is_empty() {
        return Err(Error::NoTemplate.into());
    }

    let items: Vec<String> = entries
        .iter()
        .map(|(name, source)| format!("{} ({})", name, source))
        .collect();

    let selection = Select::new()
        .with_prompt("Choose a template")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| Error::invalid_template_choice(e.to_string()))?;

    Ok(entries[selection].1.to_string())
}
