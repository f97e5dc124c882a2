//! Error types for brokkr-scaffold

use thiserror::Error;

/// Result type alias using brokkr-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid project name
    #[error("Invalid project name: {name}. Must start with a letter or underscore and contain only letters, digits and underscores")]
    InvalidProjectName { name: String },

    /// Project directory already exists
    #[error("{path} already exists")]
    ProjectExists { path: String },

    /// Project directory could not be created
    #[error("Error creating project directory: {message}")]
    ProjectDirCreation { message: String },

    /// Template source directory missing
    #[error("Unable to copy template, directory does not exist: {path}")]
    TemplateSourceMissing { path: String },

    /// Template not found in the config file
    #[error("Template not found in config: {name}")]
    TemplateNotFound { name: String },

    /// Invalid interactive template selection
    #[error("Invalid template choice: {input}")]
    InvalidTemplateChoice { input: String },

    /// No template resolved from flags or config
    #[error("No template configured. Pass --template, or add one to brokkr.toml")]
    NoTemplate,

    /// VCS binary not found on PATH
    #[error("{command} command not found. Please ensure {command} is installed and in PATH")]
    VcsNotFound { command: String },

    /// Clone operation failed
    #[error("Failed to clone template repository: {message}")]
    CloneFailed { message: String },

    /// Invalid ignore glob pattern
    #[error("Invalid ignore pattern: {pattern}")]
    InvalidIgnorePattern { pattern: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-UTF-8 path in the template tree
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

impl Error {
    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>) -> Self {
        Self::InvalidProjectName { name: name.into() }
    }

    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create a project directory creation error
    pub fn project_dir_creation(message: impl Into<String>) -> Self {
        Self::ProjectDirCreation {
            message: message.into(),
        }
    }

    /// Create a template source missing error
    pub fn template_source_missing(path: impl Into<String>) -> Self {
        Self::TemplateSourceMissing { path: path.into() }
    }

    /// Create a template not found error
    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    /// Create an invalid template choice error
    pub fn invalid_template_choice(input: impl Into<String>) -> Self {
        Self::InvalidTemplateChoice {
            input: input.into(),
        }
    }

    /// Create a VCS not found error
    pub fn vcs_not_found(command: impl Into<String>) -> Self {
        Self::VcsNotFound {
            command: command.into(),
        }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create an invalid ignore pattern error
    pub fn invalid_ignore_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidIgnorePattern {
            pattern: pattern.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}
