//! Scaffolding configuration
//!
//! [`ScaffoldConfig`] is built once at startup from CLI arguments plus
//! the optional `brokkr.toml` config file, and is read-only for the
//! rest of the run. The generated secret key is the one memoized
//! field: computed on first access and cached for the lifetime of the
//! config object.

mod file;

pub use file::ConfigFile;

use crate::error::{Error, Result};
use crate::vcs::TemplateSource;
use rand::Rng;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{LazyLock, OnceLock};

/// Directory names never copied out of a template
const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", ".hg"];

/// Default name of the template's settings directory placeholder
const DEFAULT_SETTINGS_DIR: &str = "settings";

/// Length of the generated secret key
const SECRET_KEY_LENGTH: usize = 50;

/// Charset for generated secret keys
const SECRET_KEY_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789!@#%^&*(-_=+)";

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("project name regex is valid"));

/// Immutable-after-construction configuration consumed by the materializer
#[derive(Debug)]
pub struct ScaffoldConfig {
    project_name: String,
    source: TemplateSource,
    variables: BTreeMap<String, String>,
    ignore: Vec<String>,
    exclude_dirs: Vec<String>,
    settings_dir: String,
    secret_key: OnceLock<String>,
}

impl ScaffoldConfig {
    /// Build a configuration from a project name and a template identifier
    ///
    /// The template identifier is either a local path or a `git+`/`hg+`
    /// URI; it is resolved to a [`TemplateSource`] once, here.
    ///
    /// # Errors
    /// Returns [`Error::InvalidProjectName`] if the name is not an
    /// identifier-like string.
    pub fn new(project_name: impl Into<String>, template: impl AsRef<str>) -> Result<Self> {
        let project_name = project_name.into();
        validate_project_name(&project_name)?;

        Ok(Self {
            project_name,
            source: TemplateSource::parse(template.as_ref()),
            variables: BTreeMap::new(),
            ignore: Vec::new(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            settings_dir: DEFAULT_SETTINGS_DIR.to_string(),
            secret_key: OnceLock::new(),
        })
    }

    /// Merge user variables from a `key=value,key2=value2` string
    ///
    /// Malformed entries (no `=`) are dropped with a debug log rather
    /// than failing the parse. Later entries override earlier ones.
    pub fn with_variables(mut self, spec: &str) -> Self {
        for (key, value) in parse_variables(spec) {
            self.variables.insert(key, value);
        }
        self
    }

    /// Add ignore glob patterns (files copied byte-for-byte)
    pub fn with_ignore(mut self, patterns: impl IntoIterator<Item = String>) -> Self {
        self.ignore.extend(patterns);
        self
    }

    /// Add directory names excluded from the copy entirely
    pub fn with_exclude_dirs(mut self, dirs: impl IntoIterator<Item = String>) -> Self {
        self.exclude_dirs.extend(dirs);
        self
    }

    /// Override the settings-directory placeholder value
    pub fn with_settings_dir(mut self, settings_dir: impl Into<String>) -> Self {
        self.settings_dir = settings_dir.into();
        self
    }

    /// Project name (validated at construction)
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Resolved template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// User-supplied placeholder variables
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Ignore glob patterns
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    /// Excluded directory names
    pub fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }

    /// Settings-directory placeholder value
    pub fn settings_dir(&self) -> &str {
        &self.settings_dir
    }

    /// The generated secret key, memoized on first access
    ///
    /// Every call after the first returns the identical cached value.
    pub fn secret_key(&self) -> &str {
        self.secret_key.get_or_init(generate_secret_key)
    }

    /// Set the secret key explicitly
    ///
    /// Only effective before the first [`secret_key`](Self::secret_key)
    /// read; once the cache is populated the value is fixed. Returns
    /// whether the override took effect.
    pub fn set_secret_key(&self, key: impl Into<String>) -> bool {
        let accepted = self.secret_key.set(key.into()).is_ok();
        if !accepted {
            tracing::warn!("Secret key already generated, explicit value ignored");
        }
        accepted
    }
}

/// Validate an identifier-like project name
///
/// # Errors
/// Returns [`Error::InvalidProjectName`] for names containing hyphens,
/// spaces, or leading punctuation.
pub fn validate_project_name(name: &str) -> Result<()> {
    if PROJECT_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(Error::invalid_project_name(name))
    }
}

/// Parse a `key=value,key2=value2` variable string
///
/// Entries without a `=` are skipped; a malformed string yields an
/// empty result, never an error.
pub fn parse_variables(spec: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for entry in spec.split(',') {
        match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => {
                if !entry.trim().is_empty() {
                    tracing::debug!("Skipping malformed variable entry: {}", entry);
                }
            }
        }
    }
    pairs
}

/// Generate a random secret key
fn generate_secret_key() -> String {
    let mut rng = rand::thread_rng();
    (0..SECRET_KEY_LENGTH)
        .map(|_| SECRET_KEY_CHARSET[rng.gen_range(0..SECRET_KEY_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_project_names() {
        for name in ["this_is_valid", "this1is_valid", "Thisisvalid", "_private"] {
            assert!(validate_project_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_project_names() {
        for name in [
            "this_is_not-valid",
            "this_is not_valid",
            "*this_is_not_valid",
            "1starts_with_digit",
            "",
        ] {
            assert!(
                validate_project_name(name).is_err(),
                "{name} should be invalid"
            );
        }
    }

    #[test]
    fn test_parse_variables() {
        let pairs = parse_variables("foo=bar,baz=1");
        assert_eq!(
            pairs,
            vec![
                ("foo".to_string(), "bar".to_string()),
                ("baz".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_variables_malformed() {
        assert!(parse_variables("this,is.wrong").is_empty());
        assert!(parse_variables("").is_empty());
    }

    #[test]
    fn test_parse_variables_later_entries_override() {
        let config = ScaffoldConfig::new("proj", "/tmp/tpl")
            .unwrap()
            .with_variables("foo=first,foo=second");
        assert_eq!(config.variables().get("foo"), Some(&"second".to_string()));
    }

    #[test]
    fn test_secret_key_is_memoized() {
        let config = ScaffoldConfig::new("proj", "/tmp/tpl").unwrap();
        let first = config.secret_key().to_string();
        assert_eq!(config.secret_key(), first);
        assert_eq!(first.len(), SECRET_KEY_LENGTH);
    }

    #[test]
    fn test_secret_key_explicit_set_wins() {
        let config = ScaffoldConfig::new("proj", "/tmp/tpl").unwrap();
        assert!(config.set_secret_key("this_is_cached"));
        assert_eq!(config.secret_key(), "this_is_cached");
    }

    #[test]
    fn test_secret_key_set_after_read_is_rejected() {
        let config = ScaffoldConfig::new("proj", "/tmp/tpl").unwrap();
        let generated = config.secret_key().to_string();
        assert!(!config.set_secret_key("too_late"));
        assert_eq!(config.secret_key(), generated);
    }

    #[test]
    fn test_default_exclude_dirs() {
        let config = ScaffoldConfig::new("proj", "/tmp/tpl").unwrap();
        assert!(config.exclude_dirs().contains(&".git".to_string()));
        assert!(config.exclude_dirs().contains(&".hg".to_string()));
    }

    #[test]
    fn test_invalid_name_rejected_at_construction() {
        assert!(ScaffoldConfig::new("not-valid", "/tmp/tpl").is_err());
    }
}
