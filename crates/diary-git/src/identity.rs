// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Committer identity resolution
//!
//! The email configured for a repository is the only filter used to decide
//! which commits belong to the current user. Repository-local configuration
//! wins over global configuration.

use std::path::Path;

use tracing::debug;

use crate::error::GitError;
use crate::runner::ProcessRunner;

/// A git configuration scope consulted for `user.email`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `.git/config` of the repository
    Local,
    /// The user's global configuration
    Global,
}

impl ConfigScope {
    /// Lookup order used by [`resolve_email`]
    pub const LOOKUP_ORDER: [ConfigScope; 2] = [ConfigScope::Local, ConfigScope::Global];

    /// The `git config` flag selecting this scope
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            ConfigScope::Local => "--local",
            ConfigScope::Global => "--global",
        }
    }
}

/// Resolve the committer email for `repo`, local scope first
///
/// Returns `Ok(None)` when neither scope has a non-empty `user.email`.
///
/// # Errors
///
/// Propagates spawn and I/O failures. A non-zero exit from `git config` is
/// how git reports an unset key, so it counts as "not set" rather than an
/// error.
pub async fn resolve_email<R>(runner: &R, repo: &Path) -> Result<Option<String>, GitError>
where
    R: ProcessRunner + ?Sized,
{
    for scope in ConfigScope::LOOKUP_ORDER {
        if let Some(email) = read_email(runner, repo, scope).await? {
            debug!(repo = %repo.display(), ?scope, %email, "resolved committer email");
            return Ok(Some(email));
        }
    }

    debug!(repo = %repo.display(), "no committer email configured");
    Ok(None)
}

/// Read `user.email` from a single scope
///
/// # Errors
///
/// Propagates spawn and I/O failures.
pub async fn read_email<R>(
    runner: &R,
    repo: &Path,
    scope: ConfigScope,
) -> Result<Option<String>, GitError>
where
    R: ProcessRunner + ?Sized,
{
    match runner
        .run(repo, &["config", scope.flag(), "user.email"])
        .await
    {
        Ok(email) if email.is_empty() => Ok(None),
        Ok(email) => Ok(Some(email)),
        Err(err) if err.is_command_failure() => Ok(None),
        Err(err) => Err(err),
    }
}
