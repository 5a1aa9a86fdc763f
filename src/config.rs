//! Configuration for shell_globals
//!
//! Loaded from a JSON file where every field is optional, then overridden by
//! environment variables:
//!
//! - `SHELL_GLOBALS_SHELL` - shell binary to invoke
//! - `SHELL_GLOBALS_CACHE` - path of the builtin description snapshot

use crate::assembler::EnrichmentStrategy;
use crate::description_cache::DescriptionCache;
use crate::error::ConfigError;
use crate::exec::{ExecOptions, TextEncoding};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_SHELL: &str = "SHELL_GLOBALS_SHELL";
pub const ENV_CACHE: &str = "SHELL_GLOBALS_CACHE";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobalsConfig {
    /// Shell binary (name or path)
    pub shell: PathBuf,
    pub encoding: TextEncoding,
    pub timeout_ms: Option<u64>,
    /// Description snapshot; the default location is used when unset
    pub cache_path: Option<PathBuf>,
    pub strategy: EnrichmentStrategy,
    /// Names already suggested by another source
    pub exclude: Vec<String>,
}

impl Default for GlobalsConfig {
    fn default() -> Self {
        let exec = ExecOptions::default();
        Self {
            shell: exec.shell,
            encoding: exec.encoding,
            timeout_ms: exec.timeout_ms,
            cache_path: None,
            strategy: EnrichmentStrategy::default(),
            exclude: vec![],
        }
    }
}

impl GlobalsConfig {
    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `SHELL_GLOBALS_*` overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn with_env_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(shell) = var(ENV_SHELL).filter(|s| !s.is_empty()) {
            self.shell = PathBuf::from(shell);
        }
        if let Some(cache) = var(ENV_CACHE).filter(|s| !s.is_empty()) {
            self.cache_path = Some(PathBuf::from(cache));
        }
        self
    }

    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            shell: self.shell.clone(),
            encoding: self.encoding,
            timeout_ms: self.timeout_ms,
            ..ExecOptions::default()
        }
    }

    pub fn description_cache(&self) -> DescriptionCache {
        match &self.cache_path {
            Some(path) => DescriptionCache::new(path),
            None => DescriptionCache::with_default_path(),
        }
    }

    pub fn existing_commands(&self) -> HashSet<String> {
        self.exclude.iter().cloned().collect()
    }
}
