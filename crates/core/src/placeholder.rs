//! Placeholder extraction and substitution for command templates.
//!
//! Placeholders use the `{name}` syntax, where `name` consists of ASCII
//! letters, digits, `_` and `-`. Anything else between braces is not a
//! placeholder and passes through untouched.

use std::collections::HashMap;

use indexmap::IndexSet;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Parses a placeholder starting at the opening brace.
///
/// Returns the name and the byte offset just past the closing brace.
fn parse_placeholder(rest: &str) -> Option<(&str, usize)> {
    let body = rest.strip_prefix('{')?;
    let end = body.find('}')?;
    let name = &body[..end];
    if name.is_empty() || !name.chars().all(is_name_char) {
        return None;
    }

    Some((name, 1 + end + 1))
}

/// Extracts distinct placeholder names from a command template.
///
/// Names are returned in first-occurrence order, each exactly once even if
/// referenced multiple times. A template with no placeholders yields an
/// empty list.
#[must_use]
pub fn extract(template: &str) -> Vec<String> {
    let mut names: IndexSet<String> = IndexSet::new();

    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rest = &rest[open..];
        match parse_placeholder(rest) {
            Some((name, consumed)) => {
                let _ = names.insert(name.to_string());
                rest = &rest[consumed..];
            }
            None => {
                rest = &rest[1..];
            }
        }
    }

    names.into_iter().collect()
}

/// Substitutes placeholder values into a command template.
///
/// Replacement is a single left-to-right pass of literal text: substituted
/// values are never re-scanned, placeholders without an entry in `values`
/// are left verbatim, and no shell escaping is applied. Calling this on a
/// template without placeholders returns it unchanged.
#[must_use]
pub fn substitute(template: &str, values: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(template.len());

    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        rest = &rest[open..];
        match parse_placeholder(rest) {
            Some((name, consumed)) => {
                match values.get(name) {
                    Some(value) => result.push_str(value),
                    None => result.push_str(&rest[..consumed]),
                }
                rest = &rest[consumed..];
            }
            None => {
                result.push('{');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}
