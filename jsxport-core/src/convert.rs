//! Conversion entry points
//!
//! A [`Converter`] owns everything one target needs (rule set, style tables,
//! import synthesizer) and is immutable once built, so a single instance can
//! be shared across threads for batch runs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::directive::strip_directives;
use crate::imports::ImportSynthesizer;
use crate::next::next_to_react;
use crate::rules::{total_hits, RewriteRule, RuleHit, RuleSet};
use crate::stats::ConversionStats;
use crate::style::{StyleTranslator, Vocabularies};

/// Framework the source is converted to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Target {
    /// React with Tailwind/Bootstrap classes to React Native
    #[default]
    ReactNative,
    /// Next.js page to plain React with react-router
    React,
}

impl Target {
    pub fn description(&self) -> &'static str {
        match self {
            Target::ReactNative => "React + Tailwind/Bootstrap to React Native components and styles",
            Target::React => "Next.js page to React with react-router-dom",
        }
    }

    /// Default rewrite rules for this target
    pub fn rules(&self) -> RuleSet {
        match self {
            Target::ReactNative => RuleSet::react_native(),
            Target::React => RuleSet::next_to_react(),
        }
    }

    /// Name for the converted copy of `file_name`.
    ///
    /// React Native output is `converted-<name>`, React output is
    /// `<stem>.react.<ext>`.
    pub fn output_name(&self, file_name: Option<&str>) -> String {
        let base = file_name
            .and_then(|name| Path::new(name).file_name())
            .and_then(|name| name.to_str());

        match self {
            Target::ReactNative => match base {
                Some(name) => format!("converted-{}", name),
                None => "converted-react-native.jsx".to_string(),
            },
            Target::React => {
                let Some(name) = base else {
                    return "converted.react.jsx".to_string();
                };
                let path = Path::new(name);
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
                match path.extension().and_then(|e| e.to_str()) {
                    Some(ext @ ("jsx" | "tsx")) => format!("{}.react.{}", stem, ext),
                    _ => format!("{}.react.jsx", stem),
                }
            }
        }
    }
}

/// Everything needed to build a [`Converter`]
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub target: Target,
    pub vocabularies: Vocabularies,
    /// Appended after the target's built-in rules
    pub extra_rules: Vec<RewriteRule>,
}

impl ConverterConfig {
    pub fn new(target: Target) -> Self {
        ConverterConfig {
            target,
            vocabularies: Vocabularies::builtin(),
            extra_rules: Vec::new(),
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig::new(Target::default())
    }
}

/// Rewritten code with everything the run observed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub code: String,
    pub stats: ConversionStats,
    pub warnings: Vec<String>,
    pub rule_hits: Vec<RuleHit>,
    pub imports_added: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Converter {
    target: Target,
    rules: RuleSet,
    translator: StyleTranslator,
    imports: ImportSynthesizer,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        let mut rules = config.target.rules();
        for rule in config.extra_rules {
            rules.push(rule);
        }
        Converter {
            target: config.target,
            rules,
            translator: StyleTranslator::new(config.vocabularies),
            imports: ImportSynthesizer::react_native(),
        }
    }

    /// Converter with the built-in tables and rules for `target`
    pub fn for_target(target: Target) -> Self {
        Converter::new(ConverterConfig::new(target))
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn translator(&self) -> &StyleTranslator {
        &self.translator
    }

    /// Convert one source text. Never fails; anything that could not be
    /// converted is reported through `warnings` and the stats.
    pub fn convert(&self, source: &str) -> ConversionResult {
        match self.target {
            Target::ReactNative => self.convert_react_native(source),
            Target::React => self.convert_react(source),
        }
    }

    fn convert_react_native(&self, source: &str) -> ConversionResult {
        let mut stats = ConversionStats::default();
        let mut warnings = Vec::new();

        let stripped = strip_directives(source);
        if stripped.directives_removed > 0 {
            warnings.push("Removed 'use client' directive".to_string());
        }

        let (text, rule_hits) = self.rules.apply(&stripped.text);
        stats.components_converted = total_hits(&rule_hits);

        let text = self.translator.translate(&text, &mut stats, &mut warnings);
        let synthesized = self.imports.synthesize(&text);

        tracing::debug!(
            components = stats.components_converted,
            unconverted = stats.unconverted_classes,
            imports = synthesized.added.len(),
            "converted to react-native"
        );

        ConversionResult {
            code: synthesized.text,
            stats,
            warnings,
            rule_hits,
            imports_added: synthesized.added,
        }
    }

    fn convert_react(&self, source: &str) -> ConversionResult {
        let outcome = next_to_react(source, &self.rules);
        let stats = ConversionStats {
            components_converted: total_hits(&outcome.hits) + outcome.elements_converted,
            ..Default::default()
        };

        ConversionResult {
            code: outcome.text,
            stats,
            warnings: outcome.warnings,
            rule_hits: outcome.hits,
            imports_added: Vec::new(),
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::for_target(Target::default())
    }
}

/// Convert `source` for `target` with the built-in tables and rules
pub fn convert(source: &str, target: Target) -> ConversionResult {
    Converter::for_target(target).convert(source)
}
