//! Utility-class vocabularies and their React Native style tables
//!
//! A table maps a class token (`p-4`, `bg-primary`) to the style properties
//! it stands for. Tables are plain data handed to the translator; the
//! built-in ones are constructed on demand rather than kept in globals so
//! tests and config files can substitute their own.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::value::{StyleObject, StyleValue};

/// A utility-class vocabulary with its own hit counter in the stats
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Vocabulary {
    Tailwind,
    Bootstrap,
}

/// Class token to style properties, for one vocabulary
#[derive(Debug, Clone)]
pub struct StyleTable {
    vocabulary: Vocabulary,
    entries: HashMap<String, StyleObject>,
}

impl StyleTable {
    pub fn new(vocabulary: Vocabulary) -> Self {
        StyleTable {
            vocabulary,
            entries: HashMap::new(),
        }
    }

    /// Built-in table for a vocabulary
    pub fn builtin(vocabulary: Vocabulary) -> Self {
        match vocabulary {
            Vocabulary::Tailwind => tailwind_table(),
            Vocabulary::Bootstrap => bootstrap_table(),
        }
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// Add or replace the entry for `class`
    pub fn insert(&mut self, class: impl Into<String>, style: StyleObject) {
        self.entries.insert(class.into(), style);
    }

    pub fn get(&self, class: &str) -> Option<&StyleObject> {
        self.entries.get(class)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.entries.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by class name, for stable listings
    pub fn sorted_entries(&self) -> Vec<(&str, &StyleObject)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    fn add<const N: usize>(&mut self, class: &str, props: [(&str, StyleValue); N]) {
        self.insert(class, StyleObject::from_pairs(props));
    }
}

/// Ordered list of tables; lookup is first-hit-wins in list order
#[derive(Debug, Clone)]
pub struct Vocabularies {
    tables: Vec<StyleTable>,
}

impl Vocabularies {
    pub fn new(tables: Vec<StyleTable>) -> Self {
        Vocabularies { tables }
    }

    /// Tailwind first, then Bootstrap
    pub fn builtin() -> Self {
        Vocabularies::new(vec![tailwind_table(), bootstrap_table()])
    }

    /// Look up a (prefix-stripped) class token
    pub fn lookup(&self, class: &str) -> Option<(Vocabulary, &StyleObject)> {
        self.tables
            .iter()
            .find_map(|table| table.get(class).map(|style| (table.vocabulary, style)))
    }

    pub fn table(&self, vocabulary: Vocabulary) -> Option<&StyleTable> {
        self.tables.iter().find(|t| t.vocabulary == vocabulary)
    }

    /// Mutable access to a table, appending an empty one if missing
    pub fn table_mut(&mut self, vocabulary: Vocabulary) -> &mut StyleTable {
        let index = match self.tables.iter().position(|t| t.vocabulary == vocabulary) {
            Some(index) => index,
            None => {
                self.tables.push(StyleTable::new(vocabulary));
                self.tables.len() - 1
            }
        };
        &mut self.tables[index]
    }

    pub fn tables(&self) -> &[StyleTable] {
        &self.tables
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Vocabularies::builtin()
    }
}

fn n(value: i64) -> StyleValue {
    StyleValue::from(value)
}

fn s(value: &str) -> StyleValue {
    StyleValue::from(value)
}

fn tailwind_table() -> StyleTable {
    let mut t = StyleTable::new(Vocabulary::Tailwind);

    // Layout
    t.add("flex", [("display", s("flex"))]);
    t.add("hidden", [("display", s("none"))]);
    t.add("flex-1", [("flex", n(1))]);
    t.add("flex-row", [("flexDirection", s("row"))]);
    t.add("flex-col", [("flexDirection", s("column"))]);
    t.add("flex-wrap", [("flexWrap", s("wrap"))]);

    t.add("justify-start", [("justifyContent", s("flex-start"))]);
    t.add("justify-end", [("justifyContent", s("flex-end"))]);
    t.add("justify-center", [("justifyContent", s("center"))]);
    t.add("justify-between", [("justifyContent", s("space-between"))]);
    t.add("justify-around", [("justifyContent", s("space-around"))]);

    t.add("items-start", [("alignItems", s("flex-start"))]);
    t.add("items-end", [("alignItems", s("flex-end"))]);
    t.add("items-center", [("alignItems", s("center"))]);
    t.add("items-baseline", [("alignItems", s("baseline"))]);
    t.add("items-stretch", [("alignItems", s("stretch"))]);

    // Spacing: step k is 4k px
    let spacing = [
        ("m", "margin"),
        ("mx", "marginHorizontal"),
        ("my", "marginVertical"),
        ("mt", "marginTop"),
        ("mb", "marginBottom"),
        ("ml", "marginLeft"),
        ("mr", "marginRight"),
        ("p", "padding"),
        ("px", "paddingHorizontal"),
        ("py", "paddingVertical"),
    ];
    for (prefix, property) in spacing {
        for step in 1..=5 {
            t.add(&format!("{}-{}", prefix, step), [(property, n(step * 4))]);
        }
    }

    // Colors
    t.add("bg-blue-500", [("backgroundColor", s("#3b82f6"))]);
    t.add("bg-blue-600", [("backgroundColor", s("#2563eb"))]);
    t.add("bg-gray-500", [("backgroundColor", s("#6b7280"))]);
    t.add("bg-gray-600", [("backgroundColor", s("#4b5563"))]);
    t.add("bg-red-500", [("backgroundColor", s("#ef4444"))]);
    t.add("bg-green-500", [("backgroundColor", s("#10b981"))]);
    t.add("bg-yellow-500", [("backgroundColor", s("#f59e0b"))]);
    t.add("bg-purple-500", [("backgroundColor", s("#8b5cf6"))]);
    t.add("bg-white", [("backgroundColor", s("#ffffff"))]);
    t.add("bg-black", [("backgroundColor", s("#000000"))]);

    // Text
    t.add("text-white", [("color", s("#ffffff"))]);
    t.add("text-black", [("color", s("#000000"))]);
    t.add("text-blue-500", [("color", s("#3b82f6"))]);
    t.add("text-center", [("textAlign", s("center"))]);
    t.add("text-left", [("textAlign", s("left"))]);
    t.add("text-right", [("textAlign", s("right"))]);
    t.add("text-sm", [("fontSize", n(14))]);
    t.add("text-base", [("fontSize", n(16))]);
    t.add("text-lg", [("fontSize", n(18))]);
    t.add("text-xl", [("fontSize", n(20))]);
    t.add("font-bold", [("fontWeight", s("bold"))]);
    t.add("font-normal", [("fontWeight", s("normal"))]);

    // Borders
    t.add("border", [("borderWidth", n(1)), ("borderColor", s("#d1d5db"))]);
    t.add("rounded", [("borderRadius", n(4))]);
    t.add("rounded-lg", [("borderRadius", n(8))]);
    t.add("rounded-full", [("borderRadius", n(9999))]);

    // Sizing
    t.add("w-full", [("width", s("100%"))]);
    t.add("h-full", [("height", s("100%"))]);
    t.add("w-screen", [("width", s("100%"))]);
    t.add("h-screen", [("height", s("100%"))]);

    t
}

fn bootstrap_table() -> StyleTable {
    let mut t = StyleTable::new(Vocabulary::Bootstrap);

    t.add("d-flex", [("display", s("flex"))]);
    t.add("d-none", [("display", s("none"))]);
    t.add("flex-row", [("flexDirection", s("row"))]);
    t.add("flex-column", [("flexDirection", s("column"))]);

    t.add("justify-content-start", [("justifyContent", s("flex-start"))]);
    t.add("justify-content-end", [("justifyContent", s("flex-end"))]);
    t.add("justify-content-center", [("justifyContent", s("center"))]);
    t.add("justify-content-between", [("justifyContent", s("space-between"))]);
    t.add("justify-content-around", [("justifyContent", s("space-around"))]);

    t.add("align-items-start", [("alignItems", s("flex-start"))]);
    t.add("align-items-end", [("alignItems", s("flex-end"))]);
    t.add("align-items-center", [("alignItems", s("center"))]);
    t.add("align-items-baseline", [("alignItems", s("baseline"))]);
    t.add("align-items-stretch", [("alignItems", s("stretch"))]);

    // Bootstrap's spacer scale is not linear
    let scale = [4, 8, 16, 24, 48];
    for (step, px) in scale.iter().enumerate() {
        t.add(&format!("m-{}", step + 1), [("margin", n(*px))]);
        t.add(&format!("p-{}", step + 1), [("padding", n(*px))]);
    }

    t.add("bg-primary", [("backgroundColor", s("#007bff"))]);
    t.add("bg-secondary", [("backgroundColor", s("#6c757d"))]);
    t.add("bg-success", [("backgroundColor", s("#28a745"))]);
    t.add("bg-danger", [("backgroundColor", s("#dc3545"))]);
    t.add("bg-warning", [("backgroundColor", s("#ffc107"))]);
    t.add("bg-info", [("backgroundColor", s("#17a2b8"))]);
    t.add("bg-light", [("backgroundColor", s("#f8f9fa"))]);
    t.add("bg-dark", [("backgroundColor", s("#343a40"))]);

    t.add("text-white", [("color", s("#ffffff"))]);
    t.add("text-dark", [("color", s("#343a40"))]);
    t.add("text-center", [("textAlign", s("center"))]);
    t.add("text-left", [("textAlign", s("left"))]);
    t.add("text-right", [("textAlign", s("right"))]);

    t.add("border", [("borderWidth", n(1)), ("borderColor", s("#dee2e6"))]);
    t.add("rounded", [("borderRadius", n(4))]);
    t.add("rounded-lg", [("borderRadius", n(8))]);

    t
}
