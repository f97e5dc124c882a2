//! Template materialization
//!
//! Copies a template tree into a new project directory: excluded
//! directories are skipped outright, ignore-glob files are copied
//! byte-for-byte, and every other path segment and text file gets
//! `{{ TOKEN }}` placeholder substitution. Single-pass, synchronous
//! filesystem work; remote templates are cloned by [`crate::vcs`]
//! before this runs.

use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use crate::placeholders::Placeholders;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Pipeline file at the template root, template metadata rather than
/// template content
pub const PIPELINE_FILE: &str = ".brokkr.pipeline";

/// Whether a template ships a pipeline file at its root
pub fn has_pipeline_file(template_root: &Utf8Path) -> bool {
    template_root.join(PIPELINE_FILE).is_file()
}

/// Copies a template tree into a new project directory
#[derive(Debug)]
pub struct Materializer<'a> {
    config: &'a ScaffoldConfig,
    placeholders: Placeholders,
}

impl<'a> Materializer<'a> {
    /// Create a materializer for a configuration
    ///
    /// The placeholder set (built-ins plus user variables) is derived
    /// here, which also fixes the memoized secret key.
    pub fn new(config: &'a ScaffoldConfig) -> Self {
        Self {
            config,
            placeholders: Placeholders::from_config(config),
        }
    }

    /// The placeholder set this materializer substitutes with
    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Materialize the template into `working_dir/<project_name>`
    ///
    /// # Errors
    /// Returns error if:
    /// - The project directory already exists (no writes performed)
    /// - The source template directory is missing
    /// - The project root cannot be created
    /// - Any copy or write fails (partial output may remain, no rollback)
    pub fn run(&self, source: &Utf8Path, working_dir: &Utf8Path) -> Result<Utf8PathBuf> {
        let project_root = working_dir.join(self.config.project_name());

        if project_root.exists() {
            return Err(Error::project_exists(project_root.as_str()));
        }

        if !source.is_dir() {
            return Err(Error::template_source_missing(source.as_str()));
        }

        let ignore_set = build_ignore_set(self.config.ignore())?;

        fs::create_dir(&project_root)
            .map_err(|e| Error::project_dir_creation(e.to_string()))?;

        info!("Materializing template {} -> {}", source, project_root);

        let exclude_dirs = self.config.exclude_dirs();
        let walker = WalkDir::new(source).min_depth(1).into_iter();
        for entry in walker.filter_entry(|e| {
            !(e.file_type().is_dir() && matches_exclude(e.file_name(), exclude_dirs))
        }) {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io) => Error::Io(io),
                None => Error::invalid_path(source.as_str()),
            })?;

            let path = Utf8Path::from_path(entry.path())
                .ok_or_else(|| Error::invalid_path(entry.path().display().to_string()))?;
            let relative = path
                .strip_prefix(source)
                .map_err(|_| Error::invalid_path(path.as_str()))?;

            // The pipeline file is template metadata, never copied out
            if entry.depth() == 1
                && entry.file_type().is_file()
                && path.file_name() == Some(PIPELINE_FILE)
            {
                debug!("Skipping pipeline file {}", path);
                continue;
            }

            let dest = project_root.join(self.render_relative_path(relative));

            if entry.file_type().is_dir() {
                debug!("Creating directory {}", dest);
                fs::create_dir_all(&dest)?;
            } else {
                self.copy_file(path, &dest, &ignore_set)?;
            }
        }

        info!("Template materialized at {}", project_root);
        Ok(project_root)
    }

    /// Substitute placeholders in every segment of a relative path
    fn render_relative_path(&self, relative: &Utf8Path) -> Utf8PathBuf {
        let mut rendered = Utf8PathBuf::new();
        for component in relative.components() {
            rendered.push(self.placeholders.render(component.as_str()));
        }
        rendered
    }

    /// Copy one file, substituting placeholders where appropriate
    ///
    /// Ignore-glob matches and undecodable contents are copied
    /// byte-for-byte; everything else is rendered as UTF-8 text.
    fn copy_file(&self, source: &Utf8Path, dest: &Utf8Path, ignore_set: &GlobSet) -> Result<()> {
        let file_name = source.file_name().unwrap_or_default();
        if ignore_set.is_match(file_name) {
            debug!("Copying {} verbatim (ignore match)", source);
            fs::copy(source, dest)?;
            return Ok(());
        }

        let bytes = fs::read(source)?;
        match String::from_utf8(bytes) {
            Ok(text) => {
                debug!("Rendering {}", source);
                fs::write(dest, self.placeholders.render(&text))?;
            }
            Err(e) => {
                // Binary file, copy the raw bytes untouched
                debug!("Copying {} verbatim (not UTF-8)", source);
                fs::write(dest, e.into_bytes())?;
            }
        }

        // Written files keep the source's permission bits (executable
        // template scripts stay executable)
        fs::set_permissions(dest, fs::metadata(source)?.permissions())?;

        Ok(())
    }
}

/// Compile ignore patterns into a glob set matched against file names
fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).map_err(|_| Error::invalid_ignore_pattern(pattern.clone()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::invalid_ignore_pattern(e.to_string()))
}

/// Whether a directory name is on the exclusion list
fn matches_exclude(name: &std::ffi::OsStr, exclude_dirs: &[String]) -> bool {
    name.to_str()
        .map(|n| exclude_dirs.iter().any(|d| d == n))
        .unwrap_or(false)
}
