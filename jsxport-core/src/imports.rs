//! Import statement synthesis
//!
//! Finds which target components the rewritten text uses and adds a single
//! import statement naming them, unless the module is already imported.
//! Helper bindings such as `StyleSheet` are merged into an existing import,
//! so running the synthesizer twice never produces a duplicate line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Any import statement that starts a line, including multi-line clauses
/// and side-effect imports (`import './a.css';`)
static IMPORT_STMT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+(?:[^;'"]*?\s*from\s*)?['"][^'"]+['"];?[^\n]*(?:\n|$)"#).unwrap()
});

/// `import <clause> from '<module>'` with the clause, quote, module and
/// semicolon captured
static MODULE_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+([^;'"]*?)\s*from\s*(['"])([^'"]+)['"](;?)"#).unwrap()
});

static STYLE_ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bstyle=\{").unwrap());

/// Parsed `import <clause> from '<module>'` statement
#[derive(Debug, Clone, PartialEq)]
struct ModuleImport {
    start: usize,
    end: usize,
    default: Option<String>,
    named: Option<Vec<String>>,
    namespace: bool,
    type_only: bool,
    quote: char,
    semicolon: bool,
}

impl ModuleImport {
    fn mergeable(&self) -> bool {
        !self.namespace && !self.type_only
    }

    /// True when `name` is bound locally; `View as V` binds `V`
    fn imports(&self, name: &str) -> bool {
        self.default.as_deref() == Some(name)
            || self.named.as_ref().map_or(false, |named| {
                named
                    .iter()
                    .any(|entry| entry.split_whitespace().last() == Some(name))
            })
    }

    fn render(&self, module: &str) -> String {
        let mut parts = Vec::new();
        if let Some(default) = &self.default {
            parts.push(default.clone());
        }
        if let Some(named) = &self.named {
            parts.push(format!("{{ {} }}", named.join(", ")));
        }
        format!(
            "import {} from {}{}{}{}",
            parts.join(", "),
            self.quote,
            module,
            self.quote,
            if self.semicolon { ";" } else { "" }
        )
    }
}

fn find_module_imports(text: &str, module: &str) -> Vec<ModuleImport> {
    MODULE_IMPORT_RE
        .captures_iter(text)
        .filter(|caps| caps.get(3).map_or(false, |m| m.as_str() == module))
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let clause = caps.get(1)?.as_str().trim();
            let quote = caps.get(2)?.as_str().chars().next()?;
            let semicolon = caps.get(4).map_or(false, |m| !m.as_str().is_empty());
            Some(parse_clause(clause, whole.start(), whole.end(), quote, semicolon))
        })
        .collect()
}

fn parse_clause(clause: &str, start: usize, end: usize, quote: char, semicolon: bool) -> ModuleImport {
    let mut rest = clause;
    let type_only = rest.starts_with("type ") || rest.starts_with("type{");
    if type_only {
        rest = rest["type".len()..].trim_start();
    }

    let named = match (rest.find('{'), rest.rfind('}')) {
        (Some(open), Some(close)) if open < close => {
            let names = rest[open + 1..close]
                .split(',')
                .map(|n| n.split_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|n| !n.is_empty())
                .collect();
            Some(names)
        }
        _ => None,
    };

    let head = match rest.find('{') {
        Some(open) => &rest[..open],
        None => rest,
    };
    let head = head.trim().trim_end_matches(',').trim();
    let namespace = head.starts_with('*');
    let default = if head.is_empty() || namespace {
        None
    } else {
        Some(head.to_string())
    };

    ModuleImport {
        start,
        end,
        default,
        named,
        namespace,
        type_only,
        quote,
        semicolon,
    }
}

/// Byte offset just past the last import statement, if any
pub fn last_import_end(text: &str) -> Option<usize> {
    IMPORT_STMT_RE.find_iter(text).last().map(|m| m.end())
}

/// Insert a full import line after the last import, or at the top of the
/// file followed by a blank line when there are no imports
pub fn insert_import_line(text: &str, line: &str) -> String {
    match last_import_end(text) {
        Some(end) => {
            let (head, tail) = text.split_at(end);
            if head.ends_with('\n') {
                format!("{}{}\n{}", head, line, tail)
            } else {
                format!("{}\n{}\n{}", head, line, tail)
            }
        }
        None => format!("{}\n\n{}", line, text),
    }
}

/// True when some import statement pulls from `module`
pub fn has_import_from(text: &str, module: &str) -> bool {
    !find_module_imports(text, module).is_empty()
}

/// True when `name` is imported from `module` (default, named or type import)
pub fn imports_name(text: &str, module: &str, name: &str) -> bool {
    find_module_imports(text, module).iter().any(|imp| imp.imports(name))
}

/// Make sure every name in `names` is imported from `module`.
///
/// Missing names are appended to the first braced (or default-only) import
/// from the module; without one, a new `import { … } from '<module>';`
/// line is inserted. Returns the new text and the names that were added.
pub fn ensure_named_imports(text: &str, module: &str, names: &[&str]) -> (String, Vec<String>) {
    let existing = find_module_imports(text, module);
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !existing.iter().any(|imp| imp.imports(name)))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        return (text.to_string(), missing);
    }

    if let Some(target) = existing.iter().find(|imp| imp.mergeable()) {
        let mut merged = target.clone();
        merged.named.get_or_insert_with(Vec::new).extend(missing.iter().cloned());
        let text = format!(
            "{}{}{}",
            &text[..target.start],
            leading_indent(&text[target.start..target.end]),
            merged.render(module)
        ) + &text[target.end..];
        return (text, missing);
    }

    let line = format!("import {{ {} }} from '{}';", missing.join(", "), module);
    (insert_import_line(text, &line), missing)
}

/// Make sure `name` is the default import of `module`. Returns whether the
/// text changed.
pub fn ensure_default_import(text: &str, module: &str, name: &str) -> (String, bool) {
    let existing = find_module_imports(text, module);
    if existing.iter().any(|imp| imp.default.as_deref() == Some(name)) {
        return (text.to_string(), false);
    }

    if let Some(target) = existing
        .iter()
        .find(|imp| imp.mergeable() && imp.default.is_none())
    {
        let mut merged = target.clone();
        merged.default = Some(name.to_string());
        let text = format!(
            "{}{}{}",
            &text[..target.start],
            leading_indent(&text[target.start..target.end]),
            merged.render(module)
        ) + &text[target.end..];
        return (text, true);
    }

    let line = format!("import {} from '{}';", name, module);
    (format!("{}\n{}", line, text), true)
}

fn leading_indent(statement: &str) -> &str {
    let trimmed = statement.trim_start_matches([' ', '\t']);
    &statement[..statement.len() - trimmed.len()]
}

/// Import synthesis for one target module
#[derive(Debug, Clone)]
pub struct ImportSynthesizer {
    module: String,
    components: Vec<(String, Regex)>,
    style_binding: Option<(String, String)>,
}

/// Result of one synthesis pass
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesized {
    pub text: String,
    /// Names newly imported, in import order
    pub added: Vec<String>,
}

/// React Native components recognized in rewritten markup, in import order
pub const NATIVE_COMPONENTS: &[&str] = &["View", "Text", "TouchableOpacity", "TextInput", "Image", "ScrollView"];

impl ImportSynthesizer {
    pub fn new(module: impl Into<String>, components: &[&str]) -> Self {
        let components = components
            .iter()
            .map(|name| {
                let pattern = format!(r"</?{}\b", regex::escape(name));
                let re = Regex::new(&pattern).expect("escaped component name forms a valid pattern");
                (name.to_string(), re)
            })
            .collect();
        ImportSynthesizer {
            module: module.into(),
            components,
            style_binding: None,
        }
    }

    /// Also import `name` from `module` whenever a `style={` literal exists
    pub fn with_style_binding(mut self, name: impl Into<String>, module: impl Into<String>) -> Self {
        self.style_binding = Some((name.into(), module.into()));
        self
    }

    /// `react-native` components plus `StyleSheet`
    pub fn react_native() -> Self {
        ImportSynthesizer::new("react-native", NATIVE_COMPONENTS).with_style_binding("StyleSheet", "react-native")
    }

    /// Recognized components present as an opening or closing tag, in the
    /// configured order and without duplicates
    pub fn components_present(&self, text: &str) -> Vec<String> {
        self.components
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn synthesize(&self, text: &str) -> Synthesized {
        let present = self.components_present(text);
        let names: Vec<&str> = present.iter().map(String::as_str).collect();

        // An existing import from the module is left exactly as written
        let (mut text, mut added) = if names.is_empty() || has_import_from(text, &self.module) {
            (text.to_string(), Vec::new())
        } else {
            ensure_named_imports(text, &self.module, &names)
        };

        if let Some((binding, module)) = &self.style_binding {
            if STYLE_ATTR_RE.is_match(&text) {
                let (with_style, style_added) = ensure_named_imports(&text, module, &[binding.as_str()]);
                text = with_style;
                added.extend(style_added);
            }
        }

        tracing::debug!(module = %self.module, added = ?added, "synthesized imports");

        Synthesized { text, added }
    }
}
