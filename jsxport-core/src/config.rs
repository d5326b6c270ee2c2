//! Converter configuration files
//!
//! A config file selects the target, extends (or replaces) the built-in
//! style tables and appends custom rewrite rules. TOML, JSON and YAML are
//! accepted; the format is chosen by file extension.
//!
//! ```toml
//! target = "react-native"
//!
//! [vocabularies.tailwind]
//! "shadow" = { elevation = 2 }
//!
//! [[rules]]
//! name = "section"
//! kind = "element"
//! pattern = "<section\\b([^>]*)>"
//! replacement = "<View$1>"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

use crate::convert::{ConverterConfig, Target};
use crate::error::ConfigError;
use crate::rules::{RewriteRule, RuleKind};
use crate::style::{StyleObject, StyleTable, Vocabularies, Vocabulary};

/// On-disk format of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ConfigFormat {
    Toml,
    Json,
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        ext.to_ascii_lowercase()
            .parse()
            .map_err(|_| ConfigError::UnsupportedFormat(ext.to_string()))
    }
}

/// A custom rewrite rule as written in a config file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub name: String,
    pub kind: RuleKind,
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JsxportConfig {
    pub target: Option<Target>,
    /// Start from empty tables instead of the built-in ones
    pub replace_builtin: bool,
    /// Vocabulary name to class name to style properties
    pub vocabularies: BTreeMap<String, BTreeMap<String, Map<String, Value>>>,
    pub rules: Vec<RuleConfig>,
}

impl JsxportConfig {
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(config)
    }

    /// Load a config file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), %format, "loading config");
        Self::parse(&content, format)
    }

    /// Build the converter configuration. `target` overrides the file's
    /// own target when given.
    pub fn into_converter_config(self, target: Option<Target>) -> Result<ConverterConfig, ConfigError> {
        let target = target.or(self.target).unwrap_or_default();

        let mut vocabularies = if self.replace_builtin {
            Vocabularies::new(vec![
                StyleTable::new(Vocabulary::Tailwind),
                StyleTable::new(Vocabulary::Bootstrap),
            ])
        } else {
            Vocabularies::builtin()
        };

        for (name, classes) in self.vocabularies {
            let vocabulary: Vocabulary = name
                .parse()
                .map_err(|_| ConfigError::UnknownVocabulary(name.clone()))?;
            let table = vocabularies.table_mut(vocabulary);
            for (class, properties) in classes {
                let style = StyleObject::try_from(properties).map_err(|property| ConfigError::InvalidStyleValue {
                    table: name.clone(),
                    class: class.clone(),
                    property,
                })?;
                table.insert(class, style);
            }
        }

        let extra_rules = self
            .rules
            .into_iter()
            .map(|rule| RewriteRule::new(rule.name, rule.kind, &rule.pattern, rule.replacement))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ConverterConfig {
            target,
            vocabularies,
            extra_rules,
        })
    }
}
