//! Case-convention helpers shared by the walker and the emitter.

use once_cell::sync::Lazy;
use regex::Regex;

/// Structure name used when the input yields nothing to build one from.
const FALLBACK_NAME: &str = "Model";

// Two-pass boundary splitting: acronym-like "ABCd" boundaries first, then
// plain "aB" transitions. Same passes serve snake_case and PascalCase.
static BOUNDARY_ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
static BOUNDARY_PLAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// camelCase test: starts lowercase, at least one uppercase, no separators.
pub fn is_camel_case(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_lowercase())
        && text.chars().any(|c| c.is_ascii_uppercase())
        && !text.contains(['_', ' ', '-'])
}

pub fn camel_to_snake(name: &str) -> String {
    let split = BOUNDARY_ACRONYM.replace_all(name, "${1}_${2}");
    let split = BOUNDARY_PLAIN.replace_all(&split, "${1}_${2}");
    split.to_lowercase()
}

/// snake_case, kebab-case, spaced, or camelCase input to PascalCase.
pub fn to_pascal_case(name: &str) -> String {
    if name.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    if name.contains(['_', '-', ' ']) {
        name.split(['_', '-', ' ']).map(capitalize).collect()
    } else {
        let split = BOUNDARY_ACRONYM.replace_all(name, "$1 $2");
        let split = BOUNDARY_PLAIN.replace_all(&split, "$1 $2");
        split.split(' ').map(capitalize).collect()
    }
}

// Uppercase the first character; the rest is preserved as-is.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ------------------------------- Tests ------------------------------------ //
