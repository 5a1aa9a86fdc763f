//! Completion assembly
//!
//! Merges parsed aliases and builtin names into the single ordered list the
//! host receives: aliases first, then the fixed `.` entry, then builtins.
//! Enrichment is per item; a malformed cache entry degrades that one builtin
//! to a bare name and never drops the rest of the batch.

use crate::alias::AliasRecord;
use crate::builtins::{dot_source_resource, DOT_SOURCE};
use crate::completion::{CompletionItem, CompletionItemKind, CompletionResource};
use crate::description_cache::{CommandDescription, DescriptionCache};
use crate::error::DescriptionError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which list drives builtin enrichment
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStrategy {
    /// Walk the builtins the shell reported; describe those the cache knows,
    /// emit the rest as bare names.
    #[default]
    Live,
    /// Walk every name in the cache regardless of what the shell reported.
    /// Shell builtins missing from the cache are not emitted. `.` always
    /// keeps its fixed entry.
    Cache,
}

impl FromStr for EnrichmentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(EnrichmentStrategy::Live),
            "cache" => Ok(EnrichmentStrategy::Cache),
            other => Err(format!("unknown enrichment strategy `{}` (expected live or cache)", other)),
        }
    }
}

/// Result of enriching one builtin
#[derive(Debug)]
enum Enrichment<'a> {
    Described(CompletionResource),
    Bare(&'a str),
    Failed(&'a str, DescriptionError),
}

fn described_resource(name: &str, desc: CommandDescription) -> CompletionResource {
    CompletionItem::new(name, CompletionItemKind::Method)
        .with_description(Some(desc.description))
        .with_detail(desc.args)
        .with_documentation(Some(desc.documentation))
        .into()
}

fn enrich<'a>(cache: &DescriptionCache, name: &'a str) -> Enrichment<'a> {
    match cache.describe(name) {
        Ok(Some(desc)) => Enrichment::Described(described_resource(name, desc)),
        Ok(None) => Enrichment::Bare(name),
        Err(e) => Enrichment::Failed(name, e),
    }
}

/// Build the ordered completion list.
///
/// `builtins` is the already-filtered candidate list from
/// [`enumerate_builtins`](crate::builtins::enumerate_builtins).
pub fn assemble(
    aliases: &[AliasRecord],
    builtins: &[String],
    cache: &DescriptionCache,
    strategy: EnrichmentStrategy,
) -> Vec<CompletionResource> {
    let mut completions: Vec<CompletionResource> =
        aliases.iter().map(AliasRecord::to_resource).collect();

    if builtins.iter().any(|name| name == DOT_SOURCE) {
        completions.push(dot_source_resource());
    }

    let names: Vec<&str> = match strategy {
        EnrichmentStrategy::Live => builtins
            .iter()
            .map(String::as_str)
            .filter(|name| *name != DOT_SOURCE)
            .collect(),
        EnrichmentStrategy::Cache => cache.names().filter(|name| *name != DOT_SOURCE).collect(),
    };

    let mut failures = vec![];
    for name in names {
        match enrich(cache, name) {
            Enrichment::Described(resource) => completions.push(resource),
            Enrichment::Bare(name) => completions.push(CompletionResource::Name(name.to_string())),
            Enrichment::Failed(name, e) => {
                completions.push(CompletionResource::Name(name.to_string()));
                failures.push(e);
            }
        }
    }

    if !failures.is_empty() {
        let names: Vec<&str> = failures.iter().map(|e| e.name.as_str()).collect();
        tracing::warn!(
            count = failures.len(),
            ?names,
            first_error = %failures[0],
            "builtin descriptions could not be built, falling back to bare names"
        );
    }

    completions
}
