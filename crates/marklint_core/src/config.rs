//! Rule configuration: per-rule enablement and options.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LintError;

/// Configuration file names probed in the workspace root, in precedence order.
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    ".markdownlint.json",
    ".markdownlint.yaml",
    ".markdownlint.yml",
    ".markdownlintrc",
];

/// Configuration for a single rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    /// Rule is enabled/disabled (boolean).
    Enabled(bool),
    /// Rule is enabled with specific options object.
    Options(serde_json::Value),
}

impl RuleSetting {
    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleSetting::Enabled(enabled) => *enabled,
            RuleSetting::Options(_) => true,
        }
    }

    /// Gets the rule options, if any.
    pub fn options(&self) -> Option<&serde_json::Value> {
        match self {
            RuleSetting::Enabled(_) => None,
            RuleSetting::Options(value) => Some(value),
        }
    }
}

/// Mapping from rule identifier to its setting. Unset rules default to
/// enabled, so the empty map is the all-rules-on base configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleConfig {
    settings: BTreeMap<String, RuleSetting>,
}

impl RuleConfig {
    /// The all-rules-enabled base configuration.
    pub fn all_enabled() -> Self {
        Self::default()
    }

    /// Builds a configuration from explicit settings, merged over the
    /// all-enabled default.
    pub fn from_settings(settings: BTreeMap<String, RuleSetting>) -> Self {
        Self { settings }
    }

    /// Whether `rule` is enabled. Unset rules are enabled.
    pub fn is_enabled(&self, rule: &str) -> bool {
        self.settings.get(rule).is_none_or(RuleSetting::is_enabled)
    }

    /// Options for `rule`, when configured with an options object.
    pub fn options(&self, rule: &str) -> Option<&serde_json::Value> {
        self.settings.get(rule).and_then(RuleSetting::options)
    }

    /// Finds the first existing configuration file in `root`.
    pub fn discover(root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
    }

    /// Loads a configuration file, picking the parser by extension:
    /// YAML for `.yaml`/`.yml`, JSON with comments for everything else
    /// (including `.markdownlintrc`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LintError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LintError::config(format!("Failed to read config: {e}")))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| LintError::config(format!("Invalid YAML: {e}"))),
            _ => Self::from_jsonc(&content),
        }
    }

    /// Parses a JSON-with-comments configuration string.
    pub fn from_jsonc(text: &str) -> Result<Self, LintError> {
        let value = jsonc_parser::parse_to_serde_value(text, &jsonc_parser::ParseOptions::default())
            .map_err(|e| LintError::config(format!("Invalid JSON: {e}")))?
            .ok_or_else(|| LintError::config("Empty configuration"))?;
        serde_json::from_value(value)
            .map_err(|e| LintError::config(format!("Invalid configuration shape: {e}")))
    }

    /// Resolves the effective configuration, never failing:
    ///
    /// 1. a non-empty inline override map wins;
    /// 2. else the first discovered configuration file in `root`, with parse
    ///    failures silently falling back (logged at debug level only);
    /// 3. else the all-enabled default.
    pub fn load_or_default(
        root: Option<&Path>,
        inline: Option<&BTreeMap<String, RuleSetting>>,
    ) -> Self {
        if let Some(inline) = inline
            && !inline.is_empty()
        {
            return Self::from_settings(inline.clone());
        }

        if let Some(root) = root
            && let Some(path) = Self::discover(root)
        {
            match Self::from_file(&path) {
                Ok(config) => return config,
                Err(e) => {
                    debug!("Ignoring unparseable config {}: {}", path.display(), e);
                }
            }
        }

        Self::all_enabled()
    }
}
