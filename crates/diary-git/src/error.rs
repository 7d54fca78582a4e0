// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for diary-git

use thiserror::Error;

/// Errors that can occur while driving the git executable
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be started
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// git exited with a non-zero status
    #[error("git {args} exited with {status}: {stderr}")]
    CommandFailed {
        /// Space-joined argument vector
        args: String,
        /// Exit code, or -1 if terminated by a signal
        status: i32,
        /// Captured standard error (trimmed)
        stderr: String,
    },
}

impl GitError {
    /// Whether this error is a non-zero exit rather than a spawn failure
    #[must_use]
    pub fn is_command_failure(&self) -> bool {
        matches!(self, GitError::CommandFailed { .. })
    }
}
