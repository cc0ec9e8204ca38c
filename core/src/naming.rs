//! Name derivation for schema fields.
//!
//! A declared field name is split into words at every lowercase-to-uppercase
//! transition and at `_`/`-` separators. The words are then joined into a
//! lowercase, hyphenated *token* (the flag name) or an uppercase,
//! underscored *metavar* (the display name).
//!
//! # Examples
//!
//! ```
//! use argschema_core::{field_to_metavar, field_to_token, normalize_key};
//!
//! assert_eq!(field_to_token("RequiredOpt"), "required-opt");
//! assert_eq!(field_to_metavar("RequiredOpt"), "REQUIRED_OPT");
//! assert_eq!(field_to_token("NONPOSREQUIRED"), "nonposrequired");
//! assert_eq!(normalize_key("dns_domain_a"), "dns-domain-a");
//! ```

/// Splits a declared identifier into its words.
///
/// Identifiers without any case transition or separator (e.g. `POS`) form
/// a single word.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = ch.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
        prev = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Derives the command-line token for a field name.
///
/// # Examples
///
/// ```
/// use argschema_core::field_to_token;
///
/// assert_eq!(field_to_token("BoolP"), "bool-p");
/// assert_eq!(field_to_token("required_opt"), "required-opt");
/// assert_eq!(field_to_token("POS"), "pos");
/// ```
pub fn field_to_token(name: &str) -> String {
    split_words(name)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Derives the usage metavar for a field name.
pub fn field_to_metavar(name: &str) -> String {
    split_words(name)
        .iter()
        .map(|word| word.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Canonicalizes an external config/document key into token form.
///
/// Every `_` becomes `-`; nothing else changes, so the function is
/// idempotent.
pub fn normalize_key(key: &str) -> String {
    key.replace('_', "-")
}

/// Joins a nested-record token prefix with a child token.
pub(crate) fn join_token(prefix: &str, token: &str) -> String {
    if prefix.is_empty() {
        token.to_string()
    } else {
        format!("{prefix}-{token}")
    }
}

/// Joins a nested-record metavar prefix with a child metavar.
pub(crate) fn join_metavar(prefix: &str, metavar: &str) -> String {
    if prefix.is_empty() {
        metavar.to_string()
    } else {
        format!("{prefix}_{metavar}")
    }
}
