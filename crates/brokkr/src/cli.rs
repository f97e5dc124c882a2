//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Brokkr - Scaffold new projects from templates
#[derive(Parser, Debug)]
#[command(name = "brokkr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to brokkr.toml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from a template
    New(NewArgs),

    /// List templates from the config file
    Templates(TemplatesArgs),
}

// New command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project name (letters, digits and underscores, not starting with a digit)
    pub name: String,

    /// Template path or VCS URI (git+... / hg+...)
    #[arg(long)]
    pub template: Option<String>,

    /// Template name looked up in the config file
    #[arg(short = 't', long, conflicts_with = "template")]
    pub template_name: Option<String>,

    /// Choose a template interactively from the config file
    #[arg(short = 's', long, conflicts_with_all = ["template", "template_name"])]
    pub select: bool,

    /// Custom placeholder variables (key=value,key2=value2)
    #[arg(short = 'D', long)]
    pub vars: Option<String>,

    /// Glob patterns for files copied without substitution
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Value of the SETTINGS_DIR placeholder
    #[arg(long)]
    pub settings_dir: Option<String>,

    /// Directory to create the project in
    #[arg(short = 'C', long, default_value = ".")]
    pub directory: Utf8PathBuf,
}

// Templates command
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
