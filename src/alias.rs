//! Alias listing parser

use crate::completion::{CompletionItem, CompletionItemKind, CompletionResource};
use crate::dialect::ShellDialect;
use serde::{Deserialize, Serialize};

/// One alias as reported by the shell
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasRecord {
    pub name: String,
    /// Expansion text, passed through without interpretation
    pub value: String,
}

impl AliasRecord {
    /// Completion entry for this alias. The expansion shows up both inline
    /// and as the detail line; the documentation restates the definition.
    pub fn to_resource(&self) -> CompletionResource {
        CompletionItem::new(self.name.clone(), CompletionItemKind::Alias)
            .with_description(Some(self.value.clone()))
            .with_detail(Some(self.value.clone()))
            .with_documentation(Some(format!("{}={}", self.name, self.value)))
            .into()
    }
}

/// Parse raw alias-listing output. Lines the dialect does not recognise are
/// dropped; order is preserved.
pub fn parse_aliases<D: ShellDialect + ?Sized>(dialect: &D, output: &str) -> Vec<AliasRecord> {
    let mut aliases = vec![];
    for line in output.lines().filter(|l| !l.is_empty()) {
        match dialect.parse_alias_line(line) {
            Some(record) => aliases.push(record),
            None => tracing::debug!(shell = dialect.name(), line, "skipping unrecognised alias line"),
        }
    }
    aliases
}
