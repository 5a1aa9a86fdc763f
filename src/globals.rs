//! Shell globals provider
//!
//! Owns the executor, dialect and shared description cache for one session
//! and runs the whole pipeline: list aliases and builtins (concurrently),
//! load the cache if it has not been loaded, assemble.

use crate::alias::{parse_aliases, AliasRecord};
use crate::assembler::{assemble, EnrichmentStrategy};
use crate::builtins::enumerate_builtins;
use crate::completion::CompletionResource;
use crate::description_cache::DescriptionCache;
use crate::dialect::ShellDialect;
use crate::error::GlobalsError;
use crate::exec::{ExecOptions, ShellExecutor};
use std::collections::HashSet;
use std::sync::Arc;

pub struct ShellGlobals<E, D> {
    executor: E,
    dialect: D,
    cache: Arc<DescriptionCache>,
    strategy: EnrichmentStrategy,
}

impl<E: ShellExecutor, D: ShellDialect> ShellGlobals<E, D> {
    pub fn new(executor: E, dialect: D, cache: Arc<DescriptionCache>) -> Self {
        Self {
            executor,
            dialect,
            cache,
            strategy: EnrichmentStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: EnrichmentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn cache(&self) -> &Arc<DescriptionCache> {
        &self.cache
    }

    /// Aliases currently defined in an interactive shell
    pub async fn get_aliases(&self, options: &ExecOptions) -> Result<Vec<AliasRecord>, GlobalsError> {
        let output = self
            .executor
            .exec(&options.shell, &self.dialect.alias_list_args(), options)
            .await
            .map_err(GlobalsError::Aliases)?;
        Ok(parse_aliases(&self.dialect, &output))
    }

    /// Builtin names, minus `existing`
    pub async fn get_builtin_names(
        &self,
        options: &ExecOptions,
        existing: Option<&HashSet<String>>,
    ) -> Result<Vec<String>, GlobalsError> {
        let output = self
            .executor
            .exec(&options.shell, &self.dialect.builtin_list_args(), options)
            .await
            .map_err(GlobalsError::Builtins)?;
        Ok(enumerate_builtins(&output, existing))
    }

    /// Every alias and builtin as completion resources.
    ///
    /// A failed shell invocation fails the whole call; description problems
    /// only degrade individual entries.
    pub async fn get_globals(
        &self,
        options: &ExecOptions,
        existing: Option<&HashSet<String>>,
    ) -> Result<Vec<CompletionResource>, GlobalsError> {
        self.cache.load_once();

        let (aliases, builtins) = tokio::try_join!(
            self.get_aliases(options),
            self.get_builtin_names(options, existing),
        )?;

        tracing::debug!(
            shell = self.dialect.name(),
            aliases = aliases.len(),
            builtins = builtins.len(),
            cached = self.cache.len(),
            "assembling shell globals"
        );

        Ok(assemble(&aliases, &builtins, &self.cache, self.strategy))
    }
}
