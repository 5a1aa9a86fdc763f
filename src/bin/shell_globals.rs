/*!
 * shell_globals CLI
 *
 * Lists the aliases and builtins an interactive zsh knows about as
 * completion resources, or runs individual pipeline stages for debugging.
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shell_globals::{
    enumerate_builtins, parse_aliases, CompletionResource, EnrichmentStrategy,
    GlobalsConfig, ShellGlobals, TextEncoding, TokioShellExecutor, Zsh,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shell_globals")]
#[command(about = "Shell alias and builtin completions", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Shell binary to invoke (overrides config and SHELL_GLOBALS_SHELL)
    #[arg(long, global = true)]
    shell: Option<PathBuf>,

    /// Builtin description snapshot (overrides config and SHELL_GLOBALS_CACHE)
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Decoding for shell output: utf8 or latin1
    #[arg(long, global = true)]
    encoding: Option<TextEncoding>,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print every completion
    List {
        /// Emit JSON instead of one line per completion
        #[arg(short, long)]
        json: bool,

        /// Names to leave out of the builtin list
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Which list drives builtin enrichment: live or cache
        #[arg(long)]
        strategy: Option<EnrichmentStrategy>,
    },

    /// Parse alias output (from a file, stdin with `-`, or the shell)
    Aliases {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List builtin candidates (from a file, stdin with `-`, or the shell)
    Builtins {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Show the cached description of one builtin
    Describe { name: String },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<GlobalsConfig> {
    let mut config = match &cli.config {
        Some(path) => GlobalsConfig::load(path)?,
        None => GlobalsConfig::default(),
    }
    .with_env();

    if let Some(shell) = &cli.shell {
        config.shell = shell.clone();
    }
    if let Some(cache) = &cli.cache {
        config.cache_path = Some(cache.clone());
    }
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding;
    }

    if !Zsh::matches(&config.shell.to_string_lossy()) {
        tracing::warn!(shell = %config.shell.display(), "shell does not look like zsh; alias and builtin listings may fail");
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let options = config.exec_options();

    match cli.command {
        Commands::List { json, exclude, strategy } => {
            let mut existing = config.existing_commands();
            existing.extend(exclude);

            let cache = Arc::new(config.description_cache());
            let globals = ShellGlobals::new(TokioShellExecutor, Zsh, cache)
                .with_strategy(strategy.unwrap_or(config.strategy));
            let completions = globals
                .get_globals(&options, Some(&existing))
                .await
                .context("failed to collect shell globals")?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &completions)?;
                writeln!(out)?;
            } else {
                for completion in &completions {
                    writeln!(out, "{}", format_completion(completion))?;
                }
            }
        }
        Commands::Aliases { input } => {
            let aliases = match input {
                Some(path) => parse_aliases(&Zsh, &read_input(&path)?),
                None => {
                    let cache = Arc::new(config.description_cache());
                    ShellGlobals::new(TokioShellExecutor, Zsh, cache)
                        .get_aliases(&options)
                        .await?
                }
            };
            for alias in aliases {
                println!("{}\t{}", alias.name, alias.value);
            }
        }
        Commands::Builtins { input, exclude } => {
            let mut existing = config.existing_commands();
            existing.extend(exclude);

            let names = match input {
                Some(path) => enumerate_builtins(&read_input(&path)?, Some(&existing)),
                None => {
                    let cache = Arc::new(config.description_cache());
                    ShellGlobals::new(TokioShellExecutor, Zsh, cache)
                        .get_builtin_names(&options, Some(&existing))
                        .await?
                }
            };
            for name in names {
                println!("{}", name);
            }
        }
        Commands::Describe { name } => {
            let cache = config.description_cache();
            cache.load_once();
            if !cache.is_available() {
                anyhow::bail!("description cache unavailable at {}", cache.path().display());
            }
            let desc = cache
                .describe(&name)?
                .with_context(|| format!("no cached description for `{}`", name))?;

            println!("{}", desc.description);
            if let Some(args) = &desc.args {
                println!("usage: {} {}", name, args);
            }
            if desc.documentation != desc.description {
                println!();
                println!("{}", desc.documentation);
            }
        }
        Commands::Version => {
            println!("shell_globals v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))
    }
}

fn format_completion(completion: &CompletionResource) -> String {
    match completion {
        CompletionResource::Name(name) => name.clone(),
        CompletionResource::Item(item) => {
            let mut line = format!("{} ({:?})", item.label.text, item.kind);
            if let Some(description) = &item.label.description {
                line.push_str(" - ");
                line.push_str(description);
            }
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_globals::{CompletionItem, CompletionItemKind};

    #[test]
    fn test_format_completion() {
        assert_eq!(format_completion(&CompletionResource::Name("cd".into())), "cd");

        let item = CompletionItem::new("ll", CompletionItemKind::Alias)
            .with_description(Some("ls -l".into()));
        assert_eq!(format_completion(&item.into()), "ll (Alias) - ls -l");
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "shell_globals", "builtins", "--shell", "/bin/zsh", "--encoding", "latin1", "--cache", "/tmp/c.json",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.shell, PathBuf::from("/bin/zsh"));
        assert_eq!(config.encoding, TextEncoding::Latin1);
        assert_eq!(config.exec_options().encoding, TextEncoding::Latin1);
        assert_eq!(config.cache_path, Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        assert!(Cli::try_parse_from(["shell_globals", "version", "--encoding", "utf16"]).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["shell_globals", "list", "--json", "-e", "echo", "--strategy", "cache"]).unwrap();
        match cli.command {
            Commands::List { json, exclude, strategy } => {
                assert!(json);
                assert_eq!(exclude, vec!["echo"]);
                assert_eq!(strategy, Some(EnrichmentStrategy::Cache));
            }
            _ => panic!("expected list"),
        }
    }
}
