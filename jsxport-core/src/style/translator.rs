//! className/class attribute to React Native style translation

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::table::{Vocabularies, Vocabulary};
use super::value::StyleObject;
use crate::stats::ConversionStats;

/// `className="…"`, `className='…'`, `class="…"`, `class='…'`, preceded by
/// whitespace so `data-class=` and friends are left alone
static CLASS_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(^|\s)(className|class)=(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Outcome of translating one class attribute value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassConversion {
    /// Merged style of every mapped token
    pub style: StyleObject,
    /// Tokens found in no table, in encounter order, as written
    pub unconverted: Vec<String>,
    pub tailwind_hits: usize,
    pub bootstrap_hits: usize,
}

impl ClassConversion {
    pub fn mapped_tokens(&self) -> usize {
        self.tailwind_hits + self.bootstrap_hits
    }
}

/// Drop a responsive or state prefix (`md:`, `hover:`, `md:hover:`).
///
/// Only the base utility is looked up, and its style applies regardless of
/// breakpoint or state. This is an approximation of the source behavior.
pub fn strip_prefix(token: &str) -> &str {
    match token.rfind(':') {
        Some(index) => &token[index + 1..],
        None => token,
    }
}

/// Rewrites class attributes into inline style literals
#[derive(Debug, Clone)]
pub struct StyleTranslator {
    vocabularies: Vocabularies,
}

impl StyleTranslator {
    pub fn new(vocabularies: Vocabularies) -> Self {
        StyleTranslator { vocabularies }
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    /// Translate the whitespace-separated tokens of one class value
    pub fn convert_classes(&self, classes: &str) -> ClassConversion {
        let mut conversion = ClassConversion::default();

        for token in classes.split_whitespace() {
            match self.vocabularies.lookup(strip_prefix(token)) {
                Some((vocabulary, style)) => {
                    conversion.style.merge(style);
                    match vocabulary {
                        Vocabulary::Tailwind => conversion.tailwind_hits += 1,
                        Vocabulary::Bootstrap => conversion.bootstrap_hits += 1,
                    }
                }
                None => conversion.unconverted.push(token.to_string()),
            }
        }

        conversion
    }

    /// Replace every class attribute in `text`, updating `stats` and
    /// appending one warning per attribute that kept unconverted tokens.
    ///
    /// Occurrences are independent, non-overlapping substitutions, so
    /// identical attributes in different elements are each handled once.
    pub fn translate(
        &self,
        text: &str,
        stats: &mut ConversionStats,
        warnings: &mut Vec<String>,
    ) -> String {
        let mut occurrences = 0usize;

        let result = CLASS_ATTR_RE.replace_all(text, |caps: &Captures| {
            occurrences += 1;
            let lead = caps.get(1).map_or("", |m| m.as_str());
            let attribute = caps.get(0).map_or("", |m| &m.as_str()[lead.len()..]);
            let classes = caps
                .get(3)
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());

            let conversion = self.convert_classes(classes);
            stats.record_classes(&conversion);

            let comment = if conversion.unconverted.is_empty() {
                String::new()
            } else {
                let joined = conversion.unconverted.join(" ");
                warnings.push(format!("Unconverted classes: {}", joined));
                format!(" // Unconverted classes: {}", joined)
            };

            if !conversion.style.is_empty() {
                format!("{}style={{{}}}{}", lead, conversion.style.to_literal(), comment)
            } else {
                format!("{}{}{}", lead, attribute, comment)
            }
        });

        tracing::debug!(
            occurrences,
            tailwind = stats.tailwind_classes,
            bootstrap = stats.bootstrap_classes,
            unconverted = stats.unconverted_classes,
            "translated class attributes"
        );

        result.into_owned()
    }
}

impl Default for StyleTranslator {
    fn default() -> Self {
        StyleTranslator::new(Vocabularies::builtin())
    }
}
