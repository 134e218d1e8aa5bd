//! Inline `[Name]` tag helpers.
//!
//! `[` and `]` are reserved delimiter characters, excluded from character
//! names. An unterminated `[` is literal text, not a tag. Tags referencing no
//! known character are diagnosed ([`unresolved_tags`]) but never rejected:
//! whether the rendering engine treats an unresolved tag as literal text or as
//! an error is deliberately left unspecified here.

use crate::project::model::Character;

/// The inline tag for a character name: `[Name]`.
pub fn tag(name: &str) -> String {
    format!("[{name}]")
}

/// Names referenced by tags in `text`, in first-appearance order, deduplicated.
///
/// Empty tags (`[]`) and unterminated brackets are skipped; a `[` inside a
/// candidate tag restarts the scan at the inner bracket.
pub fn referenced_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            break;
        };
        let candidate = &after[..close];
        if let Some(inner) = candidate.find('[') {
            rest = &after[inner..];
            continue;
        }
        if !candidate.is_empty() && !names.iter().any(|n| n == candidate) {
            names.push(candidate.to_owned());
        }
        rest = &after[close + 1..];
    }
    names
}

/// Referenced names with no matching character, in first-appearance order.
pub fn unresolved_tags(text: &str, characters: &[Character]) -> Vec<String> {
    referenced_names(text)
        .into_iter()
        .filter(|name| !characters.iter().any(|c| &c.name == name))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/project/tags.rs"]
mod tests;
