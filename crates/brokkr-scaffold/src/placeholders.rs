//! Placeholder resolution
//!
//! Builds the final token → value mapping consumed by the
//! materializer and renders `{{ TOKEN }}` tokens in strings and path
//! segments. Tokens without a mapping are left verbatim, braces and
//! all.

use crate::config::ScaffoldConfig;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Built-in token carrying the project name
pub const PROJECT_NAME_TOKEN: &str = "PROJECT_NAME";

/// Built-in token carrying the generated secret key
pub const SECRET_KEY_TOKEN: &str = "SECRET_KEY";

/// Built-in token carrying the settings-directory name
pub const SETTINGS_DIR_TOKEN: &str = "SETTINGS_DIR";

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("token regex is valid")
});

/// Token → value mapping with `{{ TOKEN }}` rendering
#[derive(Debug, Clone)]
pub struct Placeholders {
    map: BTreeMap<String, String>,
}

impl Placeholders {
    /// Build the placeholder set from a configuration
    ///
    /// Starts from the built-in tokens (project name, secret key,
    /// settings dir), then merges user variables on top; a user
    /// variable with a built-in's name overrides it.
    pub fn from_config(config: &ScaffoldConfig) -> Self {
        let mut map = BTreeMap::new();
        map.insert(
            PROJECT_NAME_TOKEN.to_string(),
            config.project_name().to_string(),
        );
        map.insert(SECRET_KEY_TOKEN.to_string(), config.secret_key().to_string());
        map.insert(
            SETTINGS_DIR_TOKEN.to_string(),
            config.settings_dir().to_string(),
        );

        for (key, value) in config.variables() {
            map.insert(key.clone(), value.clone());
        }

        Self { map }
    }

    /// Look up a token's value
    pub fn get(&self, token: &str) -> Option<&str> {
        self.map.get(token).map(String::as_str)
    }

    /// Whether a token is known
    pub fn contains(&self, token: &str) -> bool {
        self.map.contains_key(token)
    }

    /// Number of tokens in the set
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Substitute every known `{{ TOKEN }}` occurrence in a string
    ///
    /// Used for file contents and for path segments alike. Unknown
    /// tokens survive verbatim, including the brace markers.
    pub fn render(&self, text: &str) -> String {
        TOKEN_RE
            .replace_all(text, |caps: &Captures| match self.map.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(variables: &str) -> ScaffoldConfig {
        let config = ScaffoldConfig::new("test_project", "/tmp/tpl")
            .unwrap()
            .with_variables(variables);
        config.set_secret_key("xxx");
        config
    }

    #[test]
    fn test_builtins_present() {
        let placeholders = Placeholders::from_config(&test_config(""));
        assert_eq!(placeholders.len(), 3);
        assert_eq!(placeholders.get(PROJECT_NAME_TOKEN), Some("test_project"));
        assert_eq!(placeholders.get(SECRET_KEY_TOKEN), Some("xxx"));
        assert_eq!(placeholders.get(SETTINGS_DIR_TOKEN), Some("settings"));
    }

    #[test]
    fn test_malformed_variables_leave_builtins_only() {
        let placeholders = Placeholders::from_config(&test_config("this,is.wrong"));
        assert_eq!(placeholders.len(), 3);
    }

    #[test]
    fn test_custom_variables_added() {
        let placeholders = Placeholders::from_config(&test_config("foo=bar,baz=1"));
        assert!(placeholders.contains("foo"));
        assert_eq!(placeholders.get("foo"), Some("bar"));
        assert!(placeholders.contains("baz"));
        assert_eq!(placeholders.get("baz"), Some("1"));
    }

    #[test]
    fn test_user_variable_overrides_builtin() {
        let placeholders =
            Placeholders::from_config(&test_config("PROJECT_NAME=overridden"));
        assert_eq!(placeholders.get(PROJECT_NAME_TOKEN), Some("overridden"));
    }

    #[test]
    fn test_render_substitutes_known_tokens() {
        let placeholders = Placeholders::from_config(&test_config("foo=bar"));
        let rendered = placeholders.render("name={{ PROJECT_NAME }}, foo={{foo}}");
        assert_eq!(rendered, "name=test_project, foo=bar");
    }

    #[test]
    fn test_render_leaves_unknown_tokens_verbatim() {
        let placeholders = Placeholders::from_config(&test_config(""));
        let rendered = placeholders.render("keep {{ NOT_A_TOKEN }} as-is");
        assert_eq!(rendered, "keep {{ NOT_A_TOKEN }} as-is");
    }

    #[test]
    fn test_render_multiple_occurrences() {
        let placeholders = Placeholders::from_config(&test_config(""));
        let rendered = placeholders.render("{{ PROJECT_NAME }}/{{ PROJECT_NAME }}");
        assert_eq!(rendered, "test_project/test_project");
    }

    #[test]
    fn test_render_path_segment_with_suffix() {
        let placeholders = Placeholders::from_config(&test_config(""));
        assert_eq!(
            placeholders.render("{{PROJECT_NAME}}.txt"),
            "test_project.txt"
        );
        assert_eq!(placeholders.render("{{ PROJECT_NAME }}"), "test_project");
    }

    #[test]
    fn test_render_unknown_segment_verbatim() {
        let placeholders = Placeholders::from_config(&test_config(""));
        assert_eq!(
            placeholders.render("{{NOT_IN_PLACEHOLDERS}}"),
            "{{NOT_IN_PLACEHOLDERS}}"
        );
    }
}
