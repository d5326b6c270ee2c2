//! Ordered textual rewrite rules
//!
//! A rule is a regex plus a replacement template (`$1` style captures),
//! applied to the whole text with every non-overlapping match replaced.
//! Rules run in list order and later rules see the output of earlier ones,
//! so the order of a `RuleSet` is part of its meaning.
//!
//! Opening and closing tag rules are independent: nothing checks that tags
//! are balanced, and malformed nesting passes through untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ConfigError;

/// What a rule rewrites; element rules run before attribute rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuleKind {
    Element,
    Attribute,
    Expression,
}

/// A single pattern/replacement pair
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: String,
    pub kind: RuleKind,
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    pub fn new(
        name: impl Into<String>,
        kind: RuleKind,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidRule {
            name: name.clone(),
            source,
        })?;
        Ok(RewriteRule {
            name,
            kind,
            pattern,
            replacement: replacement.into(),
        })
    }

    /// Built-in rule; the pattern is a literal in this crate
    fn builtin(name: &str, kind: RuleKind, pattern: &str, replacement: &str) -> Self {
        RewriteRule {
            name: name.to_string(),
            kind,
            pattern: Regex::new(pattern).unwrap(),
            replacement: replacement.to_string(),
        }
    }

    /// `<tag ...>` to `<Target ...>`, attributes and self-closing slash kept
    pub fn opening_tag(tag: &str, target: &str) -> Self {
        RewriteRule::builtin(
            &format!("<{}>", tag),
            RuleKind::Element,
            &format!(r"<{}\b([^>]*)>", regex::escape(tag)),
            &format!("<{}${{1}}>", target),
        )
    }

    /// `</tag>` to `</Target>`
    pub fn closing_tag(tag: &str, target: &str) -> Self {
        RewriteRule::builtin(
            &format!("</{}>", tag),
            RuleKind::Element,
            &format!(r"</{}>", regex::escape(tag)),
            &format!("</{}>", target),
        )
    }

    /// `from=` to `to=`; the attribute value is never inspected
    pub fn attribute(from: &str, to: &str) -> Self {
        RewriteRule::builtin(
            from,
            RuleKind::Attribute,
            &format!(r"\b{}=", regex::escape(from)),
            &format!("{}=", to),
        )
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Apply to `text`, returning the new text and the number of matches
    pub fn apply(&self, text: &str) -> (String, usize) {
        let count = self.pattern.find_iter(text).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        let replaced = self.pattern.replace_all(text, self.replacement.as_str());
        (replaced.into_owned(), count)
    }
}

/// Per-rule match count from one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub rule: String,
    pub count: usize,
}

/// An explicit, ordered sequence of rewrite rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

/// React element to React Native component, with whether a closing rule exists
const NATIVE_ELEMENTS: &[(&str, &str, bool)] = &[
    ("div", "View", true),
    ("span", "Text", true),
    ("p", "Text", true),
    ("button", "TouchableOpacity", true),
    ("input", "TextInput", false),
    ("img", "Image", false),
    ("ul", "View", true),
    ("ol", "View", true),
    ("li", "Text", true),
    ("a", "TouchableOpacity", true),
];

const NATIVE_ATTRIBUTES: &[(&str, &str)] = &[("onClick", "onPress"), ("onChange", "onChangeText")];

impl RuleSet {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        RuleSet { rules }
    }

    /// Canonical React to React Native rules: every element's opening rule
    /// followed by its closing rule, then the event attribute renames.
    pub fn react_native() -> Self {
        let mut rules = Vec::new();
        for &(tag, target, closing) in NATIVE_ELEMENTS {
            rules.push(RewriteRule::opening_tag(tag, target));
            if closing {
                rules.push(RewriteRule::closing_tag(tag, target));
            }
        }
        for &(from, to) in NATIVE_ATTRIBUTES {
            rules.push(RewriteRule::attribute(from, to));
        }
        RuleSet { rules }
    }

    /// Next.js to React rules that need no surrounding context
    pub fn next_to_react() -> Self {
        RuleSet {
            rules: vec![
                RewriteRule::builtin("Link href", RuleKind::Attribute, r"<Link\s+href=", "<Link to="),
                RewriteRule::builtin(
                    "router init",
                    RuleKind::Expression,
                    r"const\s+router\s*=\s*useRouter\(\);",
                    "const navigate = useNavigate();",
                ),
                RewriteRule::builtin("router.push", RuleKind::Expression, r"\brouter\.push\b", "navigate"),
            ],
        }
    }

    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order. Returns the rewritten text and the hits of
    /// each rule that matched at least once.
    pub fn apply(&self, text: &str) -> (String, Vec<RuleHit>) {
        let mut current = text.to_string();
        let mut hits = Vec::new();

        for rule in &self.rules {
            let (next, count) = rule.apply(&current);
            if count > 0 {
                tracing::debug!(rule = %rule.name, count, "rewrite rule matched");
                hits.push(RuleHit {
                    rule: rule.name.clone(),
                    count,
                });
            }
            current = next;
        }

        (current, hits)
    }
}

/// Total matches across rule hits
pub fn total_hits(hits: &[RuleHit]) -> usize {
    hits.iter().map(|h| h.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(text: &str) -> (String, usize) {
        let (out, hits) = RuleSet::react_native().apply(text);
        (out, total_hits(&hits))
    }

    #[test]
    fn test_element_rules_keep_attributes() {
        let (out, count) = rewrite(r#"<div className="p-4" id="x">hi</div>"#);
        assert_eq!(out, r#"<View className="p-4" id="x">hi</View>"#);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_word_boundary_on_tag_names() {
        let (out, count) = rewrite("<abbr>x</abbr><path d=\"M0\"/><picture></picture>");
        assert_eq!(out, "<abbr>x</abbr><path d=\"M0\"/><picture></picture>");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_self_closing_elements() {
        let (out, _) = rewrite(r#"<img src="a.png" /><input value={v} onChange={set} />"#);
        assert_eq!(out, r#"<Image src="a.png" /><TextInput value={v} onChangeText={set} />"#);
    }

    #[test]
    fn test_event_attributes() {
        let (out, count) = rewrite("<button onClick={go}>Go</button>");
        assert_eq!(out, "<TouchableOpacity onPress={go}>Go</TouchableOpacity>");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_on_change_text_is_not_renamed_twice() {
        let (out, _) = rewrite("<TextInput onChangeText={set} />");
        assert_eq!(out, "<TextInput onChangeText={set} />");
    }

    #[test]
    fn test_unbalanced_tags_pass_through() {
        let (out, count) = rewrite("<div><span>text</div>");
        assert_eq!(out, "<View><Text>text</View>");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_element_rules_precede_attribute_rules() {
        let rules = RuleSet::react_native();
        let first_attribute = rules.rules().iter().position(|r| r.kind == RuleKind::Attribute).unwrap();
        assert!(rules.rules()[..first_attribute].iter().all(|r| r.kind == RuleKind::Element));
        assert_eq!(rules.rules()[0].name, "<div>");
        assert_eq!(rules.rules()[1].name, "</div>");
    }

    #[test]
    fn test_order_matters() {
        let a = RewriteRule::new("a", RuleKind::Expression, "foo", "bar").unwrap();
        let b = RewriteRule::new("b", RuleKind::Expression, "bar", "baz").unwrap();

        let (forward, _) = RuleSet::new(vec![a.clone(), b.clone()]).apply("foo");
        let (backward, _) = RuleSet::new(vec![b, a]).apply("foo");
        assert_eq!(forward, "baz");
        assert_eq!(backward, "bar");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RewriteRule::new("broken", RuleKind::Element, "<(div", "x").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_next_rules() {
        let source = "const router = useRouter();\n<Link href=\"/a\">A</Link>\nrouter.push('/b');";
        let (out, hits) = RuleSet::next_to_react().apply(source);
        assert_eq!(
            out,
            "const navigate = useNavigate();\n<Link to=\"/a\">A</Link>\nnavigate('/b');"
        );
        assert_eq!(total_hits(&hits), 3);
    }
}
