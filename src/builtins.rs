//! Builtin name enumeration

use crate::completion::{CompletionItem, CompletionItemKind, CompletionResource};
use std::collections::HashSet;

/// The "source a file" builtin, which gets a hand-written entry
pub const DOT_SOURCE: &str = ".";

const DOT_SOURCE_DETAIL: &str = "Source a file in the current shell";

/// Candidate builtin names from one-name-per-line output, minus blanks and
/// anything the caller already suggests from another source.
pub fn enumerate_builtins(output: &str, existing: Option<&HashSet<String>>) -> Vec<String> {
    output
        .lines()
        .filter(|name| !name.is_empty())
        .filter(|name| !existing.is_some_and(|set| set.contains(*name)))
        .map(str::to_string)
        .collect()
}

/// Fixed completion entry for `.`
pub fn dot_source_resource() -> CompletionResource {
    CompletionItem::new(DOT_SOURCE, CompletionItemKind::Method)
        .with_detail(Some(DOT_SOURCE_DETAIL.to_string()))
        .into()
}
