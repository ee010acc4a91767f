//! Name-casing transforms.
//!
//! | Transform | Input | Output |
//! |-----------|-------|--------|
//! | [`upper_camel`] | `Image URL` | `ImageURL` |
//! | [`lower_camel`] | `updated_at` | `updatedAt` |
//! | [`snake_case`] | `isPrivate` | `is_private` |
//!
//! Titles become type names with [`upper_camel`]. Field keys become accessor
//! names with [`snake_case`] in Rust and [`lower_camel`] in TypeScript; the
//! key itself is never changed for serialization.

use convert_case::{Case, Casing};

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv",
    "try", "typeof", "unsized", "virtual", "yield",
];

// Keywords that cannot be raw identifiers either.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
}

fn alphanumeric(word: &str) -> impl Iterator<Item = char> + '_ {
    word.chars().filter(|c| c.is_alphanumeric())
}

/// Words to UpperCamelCase. The first letter of each word is uppercased and
/// the rest kept as written, so acronyms survive.
pub fn upper_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in words(s) {
        let mut chars = alphanumeric(word);
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars);
        }
    }
    out
}

/// snake_case or spaced words to lowerCamelCase.
///
/// The first word is lowercased: entirely when it is an all-caps acronym,
/// otherwise only its first letter.
pub fn lower_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in words(s) {
        let word: String = alphanumeric(word).collect();
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        if !out.is_empty() {
            out.extend(first.to_uppercase());
            out.extend(chars);
        } else if word.chars().any(char::is_lowercase) {
            out.extend(first.to_lowercase());
            out.extend(chars);
        } else {
            out.push_str(&word.to_lowercase());
        }
    }
    out
}

/// Rust accessor name for a field key.
pub fn snake_case(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.to_case(Case::Snake)
}

/// Whether `name` is a Rust keyword.
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Identifier text for `name`: raw when it is a keyword, `None` when it
/// cannot be an identifier at all.
pub fn rust_ident(name: &str) -> Option<String> {
    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_alphabetic() || first == '_') || !chars.all(|c| c.is_alphanumeric() || c == '_')
    {
        return None;
    }
    if RESERVED.contains(&name) {
        return None;
    }
    if is_rust_keyword(name) {
        Some(format!("r#{}", name))
    } else {
        Some(name.to_owned())
    }
}
