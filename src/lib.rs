//! shell_globals - shell-level name completions for terminal suggestions
//!
//! Discovers the aliases and builtin commands an interactive shell knows
//! about, enriches builtins with descriptions from a static snapshot, and
//! returns them as completion resources for a host completion engine.
//!
//! Modules:
//! - exec: Shell invocation (spawn, capture stdout, timeout)
//! - dialect: Per-shell command lines and alias quoting rules
//! - alias: Alias listing parser
//! - builtins: Builtin name enumeration and the fixed `.` entry
//! - description_cache: Load-once builtin description snapshot
//! - assembler: Merge aliases and builtins into one ordered list
//! - globals: Orchestrates the whole pipeline for one session
//! - completion: Completion resource types handed to the host
//! - config: JSON/env configuration

pub mod exec;
pub mod dialect;
pub mod alias;
pub mod builtins;
pub mod description_cache;
pub mod assembler;
pub mod globals;
pub mod completion;
pub mod config;
pub mod error;

// Re-export key types for convenience
pub use alias::{parse_aliases, AliasRecord};
pub use assembler::{assemble, EnrichmentStrategy};
pub use builtins::{dot_source_resource, enumerate_builtins};
pub use completion::{CompletionItem, CompletionItemKind, CompletionLabel, CompletionResource};
pub use config::GlobalsConfig;
pub use description_cache::{CommandDescription, DescriptionCache, DescriptionEntry};
pub use dialect::{ShellDialect, Zsh};
pub use error::{ConfigError, DescriptionError, ExecError, GlobalsError};
pub use exec::{ExecOptions, ShellExecutor, TextEncoding, TokioShellExecutor};
pub use globals::ShellGlobals;
