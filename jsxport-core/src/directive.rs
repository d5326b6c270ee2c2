//! Removal of Next.js-only directives and imports
//!
//! `"use client"` and imports from `next` / `next/*` have no meaning once the
//! code leaves Next.js. A directive is only recognized as a statement on a
//! line of its own, so the phrase inside strings, comments or JSX text stays.
//! Stripping is idempotent: running it on already-stripped text changes nothing.

use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*(?:'use client'|"use client")[ \t]*;?[ \t]*(?:\r?\n|$)"#).unwrap()
});

/// Whole import statements whose module is `next` or `next/...`.
/// The clause may span lines (`import {\n  a,\n  b\n} from 'next/x'`).
static NEXT_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+(?:[^;'"]*?\s*from\s*)?['"](next(?:/[^'"]*)?)['"];?[ \t]*(?:\r?\n)?"#)
        .unwrap()
});

/// Result of stripping one source text
#[derive(Debug, Clone, PartialEq)]
pub struct Stripped {
    pub text: String,
    /// Number of `use client` directives removed
    pub directives_removed: usize,
    /// Modules whose imports were removed, in source order
    pub imports_removed: Vec<String>,
}

/// Remove `use client` directives and `next` imports from `source`
pub fn strip_directives(source: &str) -> Stripped {
    let mut text = source.to_string();
    let mut directives_removed = 0;
    let mut imports_removed = Vec::new();

    // Removing one statement can move another to the start of its line
    loop {
        let modules: Vec<String> = NEXT_IMPORT_RE
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect();
        let directives = DIRECTIVE_RE.find_iter(&text).count();
        if modules.is_empty() && directives == 0 {
            break;
        }

        text = NEXT_IMPORT_RE.replace_all(&text, "").into_owned();
        imports_removed.extend(modules);
        directives_removed += DIRECTIVE_RE.find_iter(&text).count();
        text = DIRECTIVE_RE.replace_all(&text, "").into_owned();
    }

    tracing::debug!(
        directives = directives_removed,
        imports = imports_removed.len(),
        "stripped framework directives"
    );

    Stripped {
        text,
        directives_removed,
        imports_removed,
    }
}
