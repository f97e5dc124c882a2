//! VCS template sources
//!
//! Template identifiers carrying a `git+` or `hg+` scheme prefix are
//! cloned into a fresh temporary directory before materialization;
//! anything else is treated as a literal local path. The scheme is
//! resolved once, at configuration time, into a [`TemplateSource`].

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};

/// Supported version control systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsKind {
    Git,
    Mercurial,
}

impl VcsKind {
    /// Scheme prefix on template identifiers
    pub fn prefix(&self) -> &'static str {
        match self {
            VcsKind::Git => "git+",
            VcsKind::Mercurial => "hg+",
        }
    }

    /// Client binary invoked for the clone
    pub fn command(&self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Mercurial => "hg",
        }
    }
}

impl std::fmt::Display for VcsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VcsKind::Git => write!(f, "git"),
            VcsKind::Mercurial => write!(f, "mercurial"),
        }
    }
}

/// A template identifier resolved to its kind of source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Local template directory
    Local(Utf8PathBuf),
    /// Remote repository cloned before materialization
    Vcs { kind: VcsKind, url: String },
}

impl TemplateSource {
    /// Parse a template identifier string
    ///
    /// `git+<url>` and `hg+<url>` select the matching VCS; unknown
    /// schemes are not autodetected, the identifier is used as a
    /// local path.
    pub fn parse(identifier: &str) -> Self {
        for kind in [VcsKind::Git, VcsKind::Mercurial] {
            if let Some(url) = identifier.strip_prefix(kind.prefix()) {
                return TemplateSource::Vcs {
                    kind,
                    url: url.to_string(),
                };
            }
        }
        TemplateSource::Local(Utf8PathBuf::from(identifier))
    }

    /// Whether this source requires a clone step
    pub fn is_remote(&self) -> bool {
        matches!(self, TemplateSource::Vcs { .. })
    }
}

/// A template cloned into a temporary directory
///
/// The tempdir is removed when this value drops; cleanup is
/// best-effort and not guaranteed on abnormal termination.
#[derive(Debug)]
pub struct ClonedTemplate {
    _tempdir: TempDir,
    path: Utf8PathBuf,
}

impl ClonedTemplate {
    /// Local path of the cloned template tree
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Clone a remote template into a fresh temporary directory
///
/// # Errors
/// Returns error if:
/// - The VCS client binary is not on PATH
/// - The temporary directory cannot be created
/// - The clone subprocess fails
pub async fn clone_to_temp(kind: VcsKind, url: &str) -> Result<ClonedTemplate> {
    check_vcs_available(kind).await?;

    let tempdir = TempDir::new()?;
    let dest = Utf8PathBuf::from_path_buf(tempdir.path().join("template"))
        .map_err(|p| Error::invalid_path(p.display().to_string()))?;

    info!("Cloning template: {} -> {}", url, dest);

    debug!("Running: {} clone", kind.command());
    let output = Command::new(kind.command())
        .arg("clone")
        .arg(url)
        .arg(dest.as_str())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::clone_failed(stderr));
    }

    info!("Template cloned successfully");

    Ok(ClonedTemplate {
        _tempdir: tempdir,
        path: dest,
    })
}

/// Check the VCS client binary is available
async fn check_vcs_available(kind: VcsKind) -> Result<()> {
    let result = Command::new(kind.command())
        .arg("--version")
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => Ok(()),
        _ => Err(Error::vcs_not_found(kind.command())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_git_source() {
        let source = TemplateSource::parse("git+git@somewhere.com:repo.git");
        assert_eq!(
            source,
            TemplateSource::Vcs {
                kind: VcsKind::Git,
                url: "git@somewhere.com:repo.git".to_string()
            }
        );
        assert!(source.is_remote());
    }

    #[test]
    fn test_parse_hg_source() {
        let source = TemplateSource::parse("hg+ssh://someone@somewhere.com//path");
        assert_eq!(
            source,
            TemplateSource::Vcs {
                kind: VcsKind::Mercurial,
                url: "ssh://someone@somewhere.com//path".to_string()
            }
        );
    }

    #[test]
    fn test_parse_local_path() {
        let source = TemplateSource::parse("/path/to/template");
        assert_eq!(
            source,
            TemplateSource::Local(Utf8PathBuf::from("/path/to/template"))
        );
        assert!(!source.is_remote());
    }

    #[test]
    fn test_unknown_scheme_is_local() {
        // svn+ is not supported, treated as a literal path
        let source = TemplateSource::parse("svn+https://somewhere.com/repo");
        assert!(!source.is_remote());
    }

    #[test]
    fn test_vcs_kind_commands() {
        assert_eq!(VcsKind::Git.command(), "git");
        assert_eq!(VcsKind::Mercurial.command(), "hg");
    }
}
