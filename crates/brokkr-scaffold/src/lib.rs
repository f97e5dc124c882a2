//! # brokkr-scaffold
//!
//! Scaffolding library for the Brokkr CLI providing:
//! - Configuration (CLI-supplied values merged with `brokkr.toml`)
//! - Placeholder resolution (`{{ TOKEN }}` tokens in paths and contents)
//! - VCS template sources (`git+` / `hg+` URIs cloned to a tempdir)
//! - Template materialization into a new project directory
//!
//! # Examples
//!
//! ## Materialize a local template
//!
//! ```no_run
//! use brokkr_scaffold::config::ScaffoldConfig;
//! use brokkr_scaffold::materialize::Materializer;
//! use camino::Utf8Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScaffoldConfig::new("my_project", "/path/to/template")?;
//! let materializer = Materializer::new(&config);
//! let project_root = materializer.run(
//!     Utf8Path::new("/path/to/template"),
//!     Utf8Path::new("."),
//! )?;
//! println!("created {project_root}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod materialize;
pub mod placeholders;
pub mod vcs;

pub use error::{Error, Result};

// Re-export the types the CLI touches on every run
pub use config::{ConfigFile, ScaffoldConfig};
pub use materialize::{has_pipeline_file, Materializer};
pub use placeholders::Placeholders;
pub use vcs::{ClonedTemplate, TemplateSource, VcsKind};
