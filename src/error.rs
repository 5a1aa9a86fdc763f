//! Error types shared across the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single shell invocation.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn {shell:?}: {source}")]
    Spawn {
        shell: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{shell:?} exited with {}: {stderr}", exit_label(.code))]
    NonZeroExit {
        shell: PathBuf,
        code: Option<i32>,
        stderr: String,
    },
    #[error("{shell:?} timed out after {timeout_ms}ms")]
    Timeout { shell: PathBuf, timeout_ms: u64 },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

/// A snapshot entry that exists but cannot be turned into a description.
#[derive(Debug, Error)]
#[error("malformed description entry for `{name}`: {source}")]
pub struct DescriptionError {
    pub name: String,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),
}

/// Errors surfaced to callers of [`crate::ShellGlobals`].
///
/// Only invocation failures propagate; parse and enrichment problems are
/// contained and logged where they happen.
#[derive(Debug, Error)]
pub enum GlobalsError {
    #[error("alias listing failed")]
    Aliases(#[source] ExecError),
    #[error("builtin listing failed")]
    Builtins(#[source] ExecError),
}
