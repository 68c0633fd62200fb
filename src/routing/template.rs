//! URL template substitution.
//!
//! # Responsibilities
//! - Replace `{key}` placeholders from a named parameter mapping
//! - Replace `{0}`, `{1}`, ... placeholders from a positional argument list
//!
//! # Design Decisions
//! - One left-to-right scan per pass; substituted text is never re-scanned,
//!   so results do not depend on map iteration order and a value containing
//!   `{key}` cannot trigger further substitution
//! - Unmatched placeholders are kept verbatim
//! - No brace escaping (`{{` is not special)

use std::collections::HashMap;

/// Replace `{key}` tokens whose key is present in `parameters`.
pub fn substitute_named(template: &str, parameters: &HashMap<String, String>) -> String {
    if parameters.is_empty() {
        return template.to_string();
    }
    substitute(template, |token| parameters.get(token).map(String::as_str))
}

/// Replace `{0}`..`{N-1}` with the successive `args`.
///
/// Out-of-range indices and non-numeric tokens are left untouched.
pub fn substitute_positional<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    if args.is_empty() {
        return template.to_string();
    }
    substitute(template, |token| {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        token
            .parse::<usize>()
            .ok()
            .and_then(|index| args.get(index))
            .map(|arg| arg.as_ref())
    })
}

/// Scan `template` once, asking `lookup` for the replacement of every
/// innermost `{token}`.
fn substitute<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            rest = &rest[open..];
            break;
        };

        let token = &after_open[..close];
        if token.contains('{') {
            // A later `{` starts the real placeholder; emit this one as text.
            out.push('{');
            rest = after_open;
            continue;
        }

        match lookup(token) {
            Some(value) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            }
        }
        rest = &after_open[close + 1..];
    }

    out.push_str(rest);
    out
}
