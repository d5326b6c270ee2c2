//! Next.js page to plain React component
//!
//! The passes run in a fixed order over the whole text:
//!
//! 1. `use client` and `next` imports are stripped
//! 2. `getStaticProps` / `getServerSideProps` become a `useEffect` fetch
//! 3. `next/image` elements become `<img>`
//! 4. `next/link` and `useRouter` move to `react-router-dom`
//! 5. the rewrite rules run (`href` to `to`, `router` to `navigate`)
//! 6. `setProps` callers get a `useState` declaration
//! 7. the JSX fixes in [`fixes`]
//!
//! Passes 2 to 4 are keyed on what the *original* source contained, since
//! stripping removes the imports they look for.

mod data_fetching;
mod fixes;

pub use data_fetching::{convert_data_fetching, matching_brace};
pub use fixes::apply_fixes;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::directive::strip_directives;
use crate::imports::ensure_named_imports;
use crate::rules::{RuleHit, RuleSet};

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<Image\b([^>]*?)\s*/>").unwrap());

static COMPONENT_BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)\s*\{").unwrap());

const PROPS_STATE: &str = "const [props, setProps] = useState({});";

/// What the Next.js passes produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NextOutcome {
    pub text: String,
    pub warnings: Vec<String>,
    pub hits: Vec<RuleHit>,
    /// Elements rewritten outside of the rule set (`<Image>` to `<img>`)
    pub elements_converted: usize,
}

/// `<Image … />` to `<img … />`, adding an empty `alt` when none is given
fn convert_images(text: &str) -> (String, usize) {
    let count = IMAGE_RE.find_iter(text).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    let out = IMAGE_RE.replace_all(text, |caps: &Captures| {
        let attrs = &caps[1];
        if attrs.contains("alt=") {
            format!("<img{} />", attrs)
        } else {
            format!("<img{} alt=\"\" />", attrs)
        }
    });
    (out.into_owned(), count)
}

/// Declare the `props` state inside the first function when `setProps` is used
fn inject_props_state(text: &str) -> Option<String> {
    if !text.contains("setProps(") || text.contains(PROPS_STATE) {
        return None;
    }
    let open = COMPONENT_BODY_RE.find(text)?.end();
    let mut out = String::with_capacity(text.len() + PROPS_STATE.len() + 4);
    out.push_str(&text[..open]);
    out.push_str("\n  ");
    out.push_str(PROPS_STATE);
    out.push_str(&text[open..]);
    Some(out)
}

/// Run every Next.js pass over `source` with `rules` as the rewrite stage
pub fn next_to_react(source: &str, rules: &RuleSet) -> NextOutcome {
    let mut warnings = Vec::new();

    let stripped = strip_directives(source);
    if stripped.directives_removed > 0 {
        warnings.push("Removed 'use client' directive as it's not needed in React".to_string());
    }
    for module in &stripped.imports_removed {
        warnings.push(format!("Removed import from '{}'", module));
    }
    let mut text = stripped.text;

    let (fetched, converted) = convert_data_fetching(&text);
    text = fetched;
    for name in &converted {
        warnings.push(format!("{} has been converted to useEffect with fetch", name));
    }
    if !converted.is_empty() {
        text = ensure_named_imports(&text, "react", &["useEffect"]).0;
    }

    let mut elements_converted = 0;
    if source.contains("next/image") {
        let (out, count) = convert_images(&text);
        text = out;
        elements_converted += count;
        if count > 0 {
            warnings.push("Next.js Image component has been converted to standard img tag".to_string());
        }
    }

    if source.contains("next/link") {
        text = ensure_named_imports(&text, "react-router-dom", &["Link"]).0;
        warnings.push("Next.js Link has been converted to React Router Link".to_string());
    }

    if source.contains("useRouter") || source.contains("router.push") {
        text = ensure_named_imports(&text, "react-router-dom", &["useNavigate"]).0;
        warnings.push("Next.js router has been converted to React Router navigation".to_string());
    }

    let (rewritten, hits) = rules.apply(&text);
    text = rewritten;

    if let Some(out) = inject_props_state(&text) {
        text = ensure_named_imports(&out, "react", &["useState"]).0;
        warnings.push("Added useState for props fetched on the client".to_string());
    }

    let (fixed, applied) = apply_fixes(&text);
    warnings.extend(applied);

    tracing::debug!(warnings = warnings.len(), "converted Next.js page");

    NextOutcome {
        text: fixed,
        warnings,
        hits,
        elements_converted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> NextOutcome {
        next_to_react(source, &RuleSet::next_to_react())
    }

    #[test]
    fn test_convert_images() {
        let (out, count) = convert_images("<Image src=\"/a.png\" width={10} /><Image src=\"/b.png\" alt=\"b\"/>");
        assert_eq!(count, 2);
        assert_eq!(out, "<img src=\"/a.png\" width={10} alt=\"\" /><img src=\"/b.png\" alt=\"b\" />");
    }

    #[test]
    fn test_inject_props_state() {
        let text = "export default function Page() {\n  setProps({ a: 1 });\n}";
        let out = inject_props_state(text).unwrap();
        assert_eq!(
            out,
            "export default function Page() {\n  const [props, setProps] = useState({});\n  setProps({ a: 1 });\n}"
        );
        assert!(inject_props_state(&out).is_none());
    }

    #[test]
    fn test_link_and_router() {
        let source = "'use client';\nimport Link from 'next/link';\nimport { useRouter } from 'next/router';\n\nexport default function Nav() {\n  const router = useRouter();\n  return <Link href=\"/a\" onClick={() => router.push('/b')}>A</Link>;\n}\n";
        let outcome = run(source);

        assert!(outcome.text.starts_with("import React from 'react';\n"));
        assert!(outcome.text.contains("import { Link, useNavigate } from 'react-router-dom';"));
        assert!(outcome.text.contains("const navigate = useNavigate();"));
        assert!(outcome.text.contains("<Link to=\"/a\""));
        assert!(outcome.text.contains("navigate('/b')"));
        assert!(!outcome.text.contains("use client"));
        assert!(!outcome.text.contains("next/"));
        assert_eq!(outcome.warnings[0], "Removed 'use client' directive as it's not needed in React");
    }

    #[test]
    fn test_static_props_page() {
        let source = "import { useState } from 'react';\n\nexport async function getStaticProps() {\n  const res = await fetch('/api');\n  return { props: { data: await res.json() } };\n}\n\nexport default function Home() {\n  return <div>{props.data}</div>;\n}\n";
        let outcome = run(source);

        assert!(outcome.text.starts_with("import { useState, useEffect } from 'react';"));
        assert!(outcome.text.contains("useEffect(() => {"));
        assert!(outcome.text.contains("setProps({ props: { data: await res.json() } });"));
        assert!(outcome.text.contains("export default function Home() {\n  const [props, setProps] = useState({});"));
        assert!(outcome
            .warnings
            .contains(&"getStaticProps has been converted to useEffect with fetch".to_string()));
    }

    #[test]
    fn test_image_page() {
        let source = "import Image from 'next/image';\n\nexport default function Logo() {\n  return <Image src=\"/logo.png\" width={40} height={40} />;\n}\n";
        let outcome = run(source);

        assert!(outcome.text.contains("<img src=\"/logo.png\" width={40} height={40} alt=\"\" />"));
        assert_eq!(outcome.elements_converted, 1);
        assert!(outcome.hits.is_empty());
    }

    #[test]
    fn test_plain_component_untouched_except_fixes() {
        let source = "export default function Box() {\n  return <div className=\"box\" />;\n}\n";
        let outcome = run(source);
        assert_eq!(outcome.text, source);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let source = "'use client';\nimport Link from 'next/link';\n\nfunction Nav() {\n  return <Link href=\"/\">Home</Link>;\n}\n";
        let once = run(source).text;
        let twice = run(&once);
        assert_eq!(once, twice.text);
        assert!(twice.hits.is_empty());
    }
}
