//! Conversion statistics

use serde::Serialize;
use std::ops::AddAssign;

use crate::style::ClassConversion;

/// Counters accumulated over one conversion (or summed over a batch)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStats {
    /// Class attributes with at least one Tailwind hit
    pub tailwind_classes: usize,
    /// Class attributes with at least one Bootstrap hit
    pub bootstrap_classes: usize,
    /// Rewrite-rule matches (elements, closing tags and attributes)
    pub components_converted: usize,
    /// Class tokens found in no table
    pub unconverted_classes: usize,
    /// Every class token seen
    pub class_tokens: usize,
    /// Class tokens mapped through some table
    pub mapped_tokens: usize,
}

impl ConversionStats {
    /// Fold in the outcome of one class attribute
    pub fn record_classes(&mut self, conversion: &ClassConversion) {
        if conversion.tailwind_hits > 0 {
            self.tailwind_classes += 1;
        }
        if conversion.bootstrap_hits > 0 {
            self.bootstrap_classes += 1;
        }
        self.unconverted_classes += conversion.unconverted.len();
        self.mapped_tokens += conversion.mapped_tokens();
        self.class_tokens += conversion.mapped_tokens() + conversion.unconverted.len();
    }

    /// True when no class token was left behind
    pub fn is_clean(&self) -> bool {
        self.unconverted_classes == 0
    }
}

impl AddAssign for ConversionStats {
    fn add_assign(&mut self, other: Self) {
        self.tailwind_classes += other.tailwind_classes;
        self.bootstrap_classes += other.bootstrap_classes;
        self.components_converted += other.components_converted;
        self.unconverted_classes += other.unconverted_classes;
        self.class_tokens += other.class_tokens;
        self.mapped_tokens += other.mapped_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_classes() {
        let mut stats = ConversionStats::default();
        stats.record_classes(&ClassConversion {
            tailwind_hits: 2,
            bootstrap_hits: 0,
            unconverted: vec!["foo".to_string()],
            ..Default::default()
        });

        assert_eq!(stats.tailwind_classes, 1);
        assert_eq!(stats.bootstrap_classes, 0);
        assert_eq!(stats.unconverted_classes, 1);
        assert_eq!(stats.class_tokens, 3);
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_add_assign() {
        let mut total = ConversionStats {
            components_converted: 2,
            ..Default::default()
        };
        total += ConversionStats {
            components_converted: 3,
            unconverted_classes: 1,
            ..Default::default()
        };
        assert_eq!(total.components_converted, 5);
        assert_eq!(total.unconverted_classes, 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&ConversionStats::default()).unwrap();
        assert!(json.contains("\"tailwindClasses\":0"));
        assert!(json.contains("\"componentsConverted\":0"));
    }
}
