//! Placeholder substitution for configured message templates.
//!
//! Templates are opaque strings supplied by the site operator. The engine
//! performs exactly one substitution pass per placeholder: every occurrence
//! of the placeholder is replaced with the provided value, and the value
//! itself is never re-scanned for placeholders.

/// Placeholder for the visitor's display name.
pub const USER_NAME: &str = "%userName%";
/// Placeholder for the previous name in rename confirmations.
pub const OLD_NAME: &str = "%oldName%";
/// Placeholder for the new name in rename confirmations.
pub const NEW_NAME: &str = "%newName%";

/// Substitute every occurrence of `%userName%` in a template.
pub fn personalize(template: &str, name: &str) -> String {
    fill(template, &[(USER_NAME, name)])
}

/// Substitute each `(placeholder, value)` pair in order, one pass each.
pub fn fill(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (placeholder, value) in substitutions {
        out = out.replace(placeholder, value);
    }
    out
}
