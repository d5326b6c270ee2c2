//! Small JSX clean-ups applied after the Next.js passes
//!
//! Each fix is a pure text pass that returns `Some(new_text)` when it
//! changed something. Fixes never undo each other, so their order only
//! affects where inserted lines end up.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::imports::{ensure_default_import, imports_name, insert_import_line};

static CAPITALIZED_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[A-Z][^>]*>").unwrap());

static COMPONENT_FN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"function\s+([A-Z][A-Za-z0-9]*)").unwrap());

static MAPPED_ELEMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.map\(\(([^,)]*)\)\s*=>\s*\((\s*)<([A-Za-z][^>]*?)(\s*/)?>").unwrap());

static CLASS_ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(^|\s)class=""#).unwrap());

static FOR_ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(^|\s)for=""#).unwrap());

static VOID_ELEMENTS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ["img", "br", "hr", "input", "meta", "link"]
        .into_iter()
        .map(|tag| (tag, Regex::new(&format!(r"<{tag}\b([^>]*?)\s*></{tag}>")).unwrap()))
        .collect()
});

/// Add `import React` when JSX is used without it
fn react_import(text: &str) -> Option<String> {
    if text.contains("import React") || imports_name(text, "react", "React") {
        return None;
    }
    if !text.contains("JSX.Element") && !CAPITALIZED_TAG_RE.is_match(text) {
        return None;
    }
    let (out, added) = ensure_default_import(text, "react", "React");
    added.then_some(out)
}

/// Export the first capitalized function component when nothing is exported by default
fn default_export(text: &str) -> Option<String> {
    if text.contains("export default") {
        return None;
    }
    let name = COMPONENT_FN_RE.captures(text)?.get(1)?.as_str();
    Some(format!("{}\n\nexport default {};\n", text.trim_end(), name))
}

/// Props interfaces typed with `FC` need the type import
fn fc_type_import(text: &str) -> Option<String> {
    if !text.contains("interface") || !text.contains("FC") || imports_name(text, "react", "FC") {
        return None;
    }
    Some(insert_import_line(text, "import type { FC } from 'react';"))
}

/// `key={index}` on the root element returned from `.map(...)`
fn map_keys(text: &str) -> Option<String> {
    let mut changed = false;
    let out = MAPPED_ELEMENT_RE.replace_all(text, |caps: &Captures| {
        let tag = &caps[3];
        if tag.contains("key=") {
            return caps[0].to_string();
        }
        changed = true;
        let param = caps[1].trim();
        let params = if param.is_empty() {
            "_item, index".to_string()
        } else {
            format!("{}, index", param)
        };
        let slash = caps.get(4).map_or("", |m| m.as_str());
        format!(".map(({}) => ({}<{} key={{index}}{}>", params, &caps[2], tag, slash)
    });
    changed.then(|| out.into_owned())
}

/// `<br></br>` to `<br />`
fn void_element(text: &str, tag: &str, re: &Regex) -> Option<String> {
    if !re.is_match(text) {
        return None;
    }
    Some(re.replace_all(text, format!("<{}${{1}} />", tag).as_str()).into_owned())
}

fn class_name(text: &str) -> Option<String> {
    CLASS_ATTR_RE
        .is_match(text)
        .then(|| CLASS_ATTR_RE.replace_all(text, "${1}className=\"").into_owned())
}

fn html_for(text: &str) -> Option<String> {
    if !text.contains("<label") || !FOR_ATTR_RE.is_match(text) {
        return None;
    }
    Some(FOR_ATTR_RE.replace_all(text, "${1}htmlFor=\"").into_owned())
}

/// Run every fix over `text`. Returns the result and a description of each
/// fix that changed something.
pub fn apply_fixes(text: &str) -> (String, Vec<String>) {
    let mut current = text.to_string();
    let mut applied = Vec::new();

    let mut run = |current: &mut String, fix: Option<String>, message: String| {
        if let Some(next) = fix {
            *current = next;
            applied.push(message);
        }
    };

    let fix = react_import(&current);
    run(&mut current, fix, "Added React import for JSX usage".to_string());

    let fix = default_export(&current);
    run(&mut current, fix, "Added default export for component".to_string());

    let fix = fc_type_import(&current);
    run(&mut current, fix, "Added FC type import for TypeScript components".to_string());

    let fix = map_keys(&current);
    run(&mut current, fix, "Added key prop to mapped JSX elements".to_string());

    for (tag, re) in VOID_ELEMENTS.iter() {
        let fix = void_element(&current, tag, re);
        run(&mut current, fix, format!("Fixed self-closing tag for <{}>", tag));
    }

    let fix = class_name(&current);
    run(&mut current, fix, "Converted class attributes to className".to_string());

    let fix = html_for(&current);
    run(&mut current, fix, "Converted for attributes to htmlFor".to_string());

    (current, applied)
}
