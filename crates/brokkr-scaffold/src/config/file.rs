//! `brokkr.toml` config file loading
//!
//! The config file lists named templates and optional defaults:
//!
//! ```toml
//! [defaults]
//! template = "python"
//! ignore = ["*.png", "*.gif"]
//!
//! [templates]
//! python = "/home/me/templates/python"
//! webapp = "git+git@github.com:me/webapp-template.git"
//! ```
//!
//! A missing or malformed file is never fatal: it is logged as "not
//! loaded" and the CLI continues with flag-only configuration.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use tracing::{debug, warn};

/// Config file locations searched in order, relative to the home directory
const CONFIG_FILE_LOCATIONS: &[&str] = &[".config/brokkr/brokkr.toml", ".brokkr.toml"];

/// Raw on-disk schema
#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfigFile {
    #[serde(default)]
    defaults: RawDefaults,
    #[serde(default)]
    templates: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawDefaults {
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    ignore: Vec<String>,
}

/// Loaded (or not-loaded) config file state
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    templates: BTreeMap<String, String>,
    default_template: Option<String>,
    ignore: Vec<String>,
    loaded: bool,
    path: Option<Utf8PathBuf>,
}

impl ConfigFile {
    /// Load the config file from the default search locations
    ///
    /// Never fails: missing or malformed files produce an unloaded
    /// [`ConfigFile`] and a warning.
    pub fn load() -> Self {
        match find_config_path() {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("No brokkr.toml found, using CLI-only configuration");
                Self::default()
            }
        }
    }

    /// Load the config file from an explicit path
    ///
    /// Missing or malformed files produce an unloaded [`ConfigFile`].
    pub fn from_path(path: &Utf8Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Config file {} not loaded: {}", path, e);
                return Self::default();
            }
        };

        let raw: RawConfigFile = match toml::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Config file {} not loaded: {}", path, e);
                return Self::default();
            }
        };

        debug!("Loaded {}", path);
        Self {
            templates: raw.templates,
            default_template: raw.defaults.template,
            ignore: raw.defaults.ignore,
            loaded: true,
            path: Some(path.to_owned()),
        }
    }

    /// Whether a config file was successfully parsed
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Path the config was loaded from, if any
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// All configured templates, name → path-or-URI
    pub fn templates(&self) -> &BTreeMap<String, String> {
        &self.templates
    }

    /// Look up a template source by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Template names, sorted (BTreeMap iteration order)
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// Default ignore patterns from `[defaults] ignore`
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    /// The default template source, if one can be determined
    ///
    /// An explicit `[defaults] template` entry wins; otherwise, a
    /// config file listing exactly one template uses that as the
    /// default. Zero or several templates without an explicit default
    /// yields `None`.
    pub fn default_template(&self) -> Option<&str> {
        if let Some(name) = &self.default_template {
            return self.get(name);
        }
        if self.templates.len() == 1 {
            return self.templates.values().next().map(String::as_str);
        }
        None
    }
}

/// Find the first existing config file location
fn find_config_path() -> Option<Utf8PathBuf> {
    let home = dirs::home_dir()?;
    let home = Utf8PathBuf::from_path_buf(home).ok()?;

    CONFIG_FILE_LOCATIONS
        .iter()
        .map(|loc| home.join(loc))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("brokkr.toml")).unwrap();
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_valid_config() {
        let (_dir, path) = write_config(
            r#"
[defaults]
template = "python"

[templates]
python = "/path/to/template"
webapp = "git+git@github.com:me/webapp.git"
"#,
        );

        let config = ConfigFile::from_path(&path);
        assert!(config.loaded());
        assert_eq!(config.get("python"), Some("/path/to/template"));
        assert_eq!(config.names(), vec!["python", "webapp"]);
        assert_eq!(config.default_template(), Some("/path/to/template"));
    }

    #[test]
    fn test_malformed_config_is_not_loaded() {
        let (_dir, path) = write_config("this is [not valid toml");

        let config = ConfigFile::from_path(&path);
        assert!(!config.loaded());
        assert!(config.templates().is_empty());
    }

    #[test]
    fn test_missing_config_is_not_loaded() {
        let config = ConfigFile::from_path(Utf8Path::new("/this/does/not/exist.toml"));
        assert!(!config.loaded());
    }

    #[test]
    fn test_single_template_acts_as_default() {
        let (_dir, path) = write_config(
            r#"
[templates]
only = "/path/to/only"
"#,
        );

        let config = ConfigFile::from_path(&path);
        assert_eq!(config.default_template(), Some("/path/to/only"));
    }

    #[test]
    fn test_multiple_templates_without_default() {
        let (_dir, path) = write_config(
            r#"
[templates]
a = "/path/a"
b = "/path/b"
"#,
        );

        let config = ConfigFile::from_path(&path);
        assert_eq!(config.default_template(), None);
    }

    #[test]
    fn test_default_ignore_patterns() {
        let (_dir, path) = write_config(
            r#"
[defaults]
ignore = ["*.png", "*.gif"]

[templates]
a = "/path/a"
"#,
        );

        let config = ConfigFile::from_path(&path);
        assert_eq!(config.ignore(), ["*.png".to_string(), "*.gif".to_string()]);
    }
}
