//! getStaticProps / getServerSideProps to client-side useEffect
//!
//! Function bodies are delimited by brace matching, so nested object
//! literals and braces inside strings stay part of the body.

use once_cell::sync::Lazy;
use regex::Regex;

static DATA_FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+async\s+function\s+(getStaticProps|getServerSideProps)\s*\([^)]*\)\s*\{").unwrap()
});

static RETURN_OBJECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\breturn\s*\{").unwrap());

/// Index of the `}` matching the `{` at `open`.
///
/// String literals, template literals and comments are skipped. Returns
/// `None` when the braces never balance.
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// `return { … }` to `setProps({ … })` for every returned object literal
fn returns_to_set_props(body: &str) -> String {
    let mut out = body.to_string();
    // Back to front so earlier offsets stay valid
    let starts: Vec<(usize, usize)> = RETURN_OBJECT_RE
        .find_iter(body)
        .map(|m| (m.start(), m.end() - 1))
        .collect();

    for (start, open) in starts.into_iter().rev() {
        if let Some(close) = matching_brace(&out, open) {
            let object = out[open..=close].to_string();
            out.replace_range(start..=close, &format!("setProps({})", object));
        }
    }
    out
}

fn use_effect_block(body: &str) -> String {
    format!(
        "useEffect(() => {{
    const fetchData = async () => {{
      try {{{}}} catch (error) {{
        console.error('Error fetching data:', error);
      }}
    }};
    fetchData();
  }}, []);",
        body
    )
}

/// Replace every data-fetching export with an equivalent `useEffect` call.
///
/// Returns the new text and the names of the converted functions.
pub fn convert_data_fetching(text: &str) -> (String, Vec<String>) {
    let found: Vec<(usize, usize, String)> = DATA_FN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((whole.start(), whole.end() - 1, caps[1].to_string()))
        })
        .collect();

    let mut out = text.to_string();
    let mut converted = Vec::new();

    for (start, open, name) in found.into_iter().rev() {
        let Some(close) = matching_brace(&out, open) else {
            tracing::debug!(function = %name, "unbalanced body, left unchanged");
            continue;
        };
        let body = returns_to_set_props(&out[open + 1..close]);
        out.replace_range(start..=close, &use_effect_block(&body));
        converted.push(name);
    }

    converted.reverse();
    (out, converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_brace_nested() {
        let text = "{ a: { b: 1 }, c: '}' } tail";
        assert_eq!(matching_brace(text, 0), Some(22));
    }

    #[test]
    fn test_matching_brace_skips_comments_and_templates() {
        let text = "{ // }\n const s = `${x}}`; /* } */ }";
        assert_eq!(matching_brace(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_matching_brace_unbalanced() {
        assert_eq!(matching_brace("{ { }", 0), None);
        assert_eq!(matching_brace("x", 0), None);
    }

    #[test]
    fn test_returns_to_set_props() {
        let body = "\n  const data = await load();\n  return { props: { data } };\n";
        assert_eq!(
            returns_to_set_props(body),
            "\n  const data = await load();\n  setProps({ props: { data } });\n"
        );
    }

    #[test]
    fn test_convert_get_static_props() {
        let source = "export async function getStaticProps() {\n  return { props: { a: 1 } };\n}\n";
        let (out, converted) = convert_data_fetching(source);

        assert_eq!(converted, vec!["getStaticProps"]);
        assert!(out.starts_with("useEffect(() => {\n    const fetchData = async () => {\n      try {\n"));
        assert!(out.contains("setProps({ props: { a: 1 } });"));
        assert!(out.contains("console.error('Error fetching data:', error);"));
        assert!(out.trim_end().ends_with("}, []);"));
        assert!(!out.contains("getStaticProps"));
    }

    #[test]
    fn test_convert_both_functions_in_order() {
        let source = "export async function getServerSideProps(ctx) { return { props: {} }; }\nexport async function getStaticProps() { return { props: {} }; }";
        let (_, converted) = convert_data_fetching(source);
        assert_eq!(converted, vec!["getServerSideProps", "getStaticProps"]);
    }

    #[test]
    fn test_no_data_fetching() {
        let source = "export default function Page() { return <div/>; }";
        let (out, converted) = convert_data_fetching(source);
        assert_eq!(out, source);
        assert!(converted.is_empty());
    }
}
