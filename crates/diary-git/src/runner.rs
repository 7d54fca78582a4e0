// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Subprocess execution of the git executable
//!
//! Every higher-level operation in this crate goes through [`ProcessRunner`],
//! so tests can substitute a scripted fake for the real binary.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Runs git with a working directory and an argument vector
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run git in `cwd` and return its trimmed standard output
    ///
    /// # Errors
    ///
    /// Returns `GitError::Spawn` if the executable cannot be started and
    /// `GitError::CommandFailed` if it exits with a non-zero status.
    async fn run(&self, cwd: &Path, args: &[&str]) -> Result<String, GitError>;
}

/// [`ProcessRunner`] backed by the `git` binary on `PATH`
///
/// There is no timeout: a child that never exits stalls the caller.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Use `git` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific executable
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable this runner invokes
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for GitCli {
    async fn run(&self, cwd: &Path, args: &[&str]) -> Result<String, GitError> {
        debug!(cwd = %cwd.display(), ?args, "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                args: args.join(" "),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
