//! Shell invocation - run a command line under a shell binary and capture stdout
//!
//! The completion pipeline only needs "give me stdout or fail", so the
//! executor is a trait; `TokioShellExecutor` is the real implementation and
//! tests substitute scripted fakes.

use crate::error::ExecError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// How captured stdout bytes are turned into text
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// UTF-8, invalid sequences replaced with U+FFFD
    #[default]
    Utf8,
    /// ISO-8859-1, one byte per char
    Latin1,
}

impl TextEncoding {
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            "latin1" | "iso-8859-1" | "binary" => Ok(TextEncoding::Latin1),
            other => Err(crate::error::ConfigError::UnknownEncoding(other.to_string())),
        }
    }
}

/// Process options passed through to every shell invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecOptions {
    pub shell: PathBuf,
    pub encoding: TextEncoding,
    pub cwd: Option<PathBuf>,
    pub env: HashMap<String, String>,
    pub timeout_ms: Option<u64>,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("zsh"),
            encoding: TextEncoding::Utf8,
            cwd: None,
            env: HashMap::new(),
            timeout_ms: Some(10_000),
        }
    }
}

/// Runs `shell args...` and returns captured stdout.
///
/// Implementations fail on spawn errors and non-zero exit; the caller sees
/// those failures unchanged.
pub trait ShellExecutor: Send + Sync {
    fn exec(
        &self,
        shell: &Path,
        args: &[String],
        options: &ExecOptions,
    ) -> impl Future<Output = Result<String, ExecError>> + Send;
}

/// Spawns real processes with tokio
#[derive(Clone, Debug, Default)]
pub struct TokioShellExecutor;

impl ShellExecutor for TokioShellExecutor {
    async fn exec(
        &self,
        shell: &Path,
        args: &[String],
        options: &ExecOptions,
    ) -> Result<String, ExecError> {
        let mut cmd = Command::new(shell);
        cmd.args(args)
            .envs(&options.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(shell = %shell.display(), ?args, "spawning shell");

        let child = cmd.spawn().map_err(|source| ExecError::Spawn {
            shell: shell.to_path_buf(),
            source,
        })?;

        let output = match options.timeout_ms {
            Some(timeout_ms) => {
                match timeout(Duration::from_millis(timeout_ms), child.wait_with_output()).await {
                    Ok(result) => result,
                    // Dropping the future drops the child, which kills it
                    Err(_) => {
                        return Err(ExecError::Timeout {
                            shell: shell.to_path_buf(),
                            timeout_ms,
                        })
                    }
                }
            }
            None => child.wait_with_output().await,
        }
        .map_err(|source| ExecError::Spawn {
            shell: shell.to_path_buf(),
            source,
        })?;

        if !output.status.success() {
            return Err(ExecError::NonZeroExit {
                shell: shell.to_path_buf(),
                code: output.status.code(),
                stderr: options.encoding.decode(&output.stderr).trim().to_string(),
            });
        }

        Ok(options.encoding.decode(&output.stdout))
    }
}
