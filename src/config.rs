use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::block::CalloutKind;
use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub links: LinksConfig,
    pub page: PageConfig,
    /// Callout styles keyed by kind name (`disclaimer`, `warning`, ...).
    pub callouts: BTreeMap<String, CalloutStyle>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            links: LinksConfig::default(),
            page: PageConfig::default(),
            callouts: CalloutKind::ALL
                .into_iter()
                .map(|kind| (kind.as_str().to_string(), CalloutStyle::builtin(kind)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub color: String,
    pub underline: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            color: "#1a4f8b".to_string(),
            underline: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

/// Visual treatment of one callout kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalloutStyle {
    pub icon: String,
    pub accent: String,
    pub background: String,
}

impl CalloutStyle {
    fn builtin(kind: CalloutKind) -> Self {
        let (icon, accent, background) = match kind {
            CalloutKind::Disclaimer => ("ℹ", "#4b5563", "#f3f4f6"),
            CalloutKind::Warning => ("⚠", "#b45309", "#fffbeb"),
            CalloutKind::Important => ("‼", "#b91c1c", "#fef2f2"),
            CalloutKind::Note => ("✎", "#1d4ed8", "#eff6ff"),
        };
        Self {
            icon: icon.to_string(),
            accent: accent.to_string(),
            background: background.to_string(),
        }
    }
}

impl Config {
    /// The config bundled with the crate (validated by the build script).
    pub fn compiled_default() -> Self {
        Self::from_toml(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Parse a TOML config. Callout kinds the file leaves out keep their
    /// built-in style.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        for kind in CalloutKind::ALL {
            config
                .callouts
                .entry(kind.as_str().to_string())
                .or_insert_with(|| CalloutStyle::builtin(kind));
        }
        Ok(config)
    }

    /// Load config from a TOML file, or return the compiled default if not found.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config not found, using compiled default");
                Ok(Self::compiled_default())
            }
            Err(source) => Err(Error::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Style for a callout kind name; unknown names get note styling.
    pub fn callout_style(&self, key: &str) -> CalloutStyle {
        self.callouts
            .get(key)
            .or_else(|| self.callouts.get(CalloutKind::Note.as_str()))
            .cloned()
            .unwrap_or_else(|| CalloutStyle::builtin(CalloutKind::Note))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn compiled_default_matches_builtin() {
        let compiled = Config::compiled_default();
        let builtin = Config::default();
        assert_eq!(compiled.links.color, builtin.links.color);
        assert_eq!(compiled.links.underline, builtin.links.underline);
        assert_eq!(compiled.page.numbers, builtin.page.numbers);
        assert_eq!(compiled.callouts, builtin.callouts);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = Config::from_toml(
            "[links]\nunderline = false\n\n[callouts.warning]\nicon = \"!\"\naccent = \"#ff0000\"\nbackground = \"#ffeeee\"\n",
        )
        .unwrap();
        assert!(!config.links.underline);
        assert_eq!(config.links.color, "#1a4f8b");
        assert_eq!(config.callout_style("warning").icon, "!");
        assert_eq!(
            config.callout_style("note"),
            CalloutStyle::builtin(CalloutKind::Note)
        );
    }

    #[test]
    fn unknown_callout_key_uses_note_style() {
        let config = Config::default();
        assert_eq!(config.callout_style("tip"), config.callout_style("note"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            Config::from_toml("[links\ncolor = 1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_file_uses_compiled_default() {
        let config = Config::load(Path::new("/nonexistent/textblocks.toml")).unwrap();
        assert_eq!(config.callouts.len(), 4);
    }
}
