//! Completion resources handed to the host completion engine
//!
//! The shape mirrors what terminal completion UIs consume: a label with an
//! optional inline description, a detail line, long-form documentation and a
//! kind used to pick an icon.

use serde::{Deserialize, Serialize};

/// Icon/kind indicator for a completion item
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CompletionItemKind {
    Method,
    Alias,
}

/// The text a user would type, plus an optional inline description
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionLabel {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompletionLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: None,
        }
    }
}

/// A fully described suggestion
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: CompletionLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub kind: CompletionItemKind,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: CompletionLabel::new(label),
            detail: None,
            documentation: None,
            kind,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.label.description = description;
        self
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_documentation(mut self, documentation: Option<String>) -> Self {
        self.documentation = documentation;
        self
    }
}

/// One suggestible entry: either a bare name or a structured item
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CompletionResource {
    Name(String),
    Item(CompletionItem),
}

impl CompletionResource {
    /// The literal token a user would type
    pub fn label_text(&self) -> &str {
        match self {
            CompletionResource::Name(name) => name,
            CompletionResource::Item(item) => &item.label.text,
        }
    }

    pub fn as_item(&self) -> Option<&CompletionItem> {
        match self {
            CompletionResource::Item(item) => Some(item),
            CompletionResource::Name(_) => None,
        }
    }
}

impl From<CompletionItem> for CompletionResource {
    fn from(item: CompletionItem) -> Self {
        CompletionResource::Item(item)
    }
}
