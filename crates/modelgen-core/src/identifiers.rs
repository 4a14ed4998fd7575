//! SQL identifier helpers shared by the validators and emitters.

use regex::Regex;
use std::sync::OnceLock;

/// Pattern for bare (unquoted) SQL identifiers.
fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid pattern"))
}

/// Check whether a string is usable as a bare table or column name.
///
/// The emitters never quote identifiers (the schema string is a literal
/// compatibility contract), so anything that would need quoting is rejected
/// up front by the validators.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    identifier_pattern().is_match(name)
}

/// Replace every character that cannot appear in a bare identifier with `_`.
///
/// Used for derived names (generated type idents, temp keys), never for
/// user-declared table or column names.
#[must_use]
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}
