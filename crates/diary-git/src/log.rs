// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit listing via `git log`
//!
//! Time-window and author filtering are delegated to git itself. The output
//! format packs hash, subject, author name and author date onto one line
//! separated by [`FIELD_SEPARATOR`].
//!
//! A subject line that itself contains the separator is split at that
//! character too, so the tail of the subject shifts into the author and
//! date fields. Output is not escaped to guard against this.

use std::path::Path;

use tracing::debug;

use crate::commit::CommitSummary;
use crate::error::GitError;
use crate::runner::ProcessRunner;

/// Separator between fields of one `git log` line
pub const FIELD_SEPARATOR: char = '|';

/// Pretty format passed to `git log --format=`
pub const LOG_FORMAT: &str = "%H|%s|%an|%ai";

/// Build the `git log` argument vector for a window and author
#[must_use]
pub fn log_args(days: u32, author: &str) -> Vec<String> {
    vec![
        "log".to_string(),
        format!("--since={days} days ago"),
        format!("--author={author}"),
        format!("--format={LOG_FORMAT}"),
    ]
}

/// List commits by `identity` from the last `days` days, in git's order
///
/// With no identity nothing can match the author filter, so the result is
/// empty and git is never invoked.
///
/// # Errors
///
/// Returns `GitError` if `git log` cannot be run or exits non-zero.
pub async fn list_commits<R>(
    runner: &R,
    repo: &Path,
    days: u32,
    identity: Option<&str>,
) -> Result<Vec<CommitSummary>, GitError>
where
    R: ProcessRunner + ?Sized,
{
    let Some(author) = identity else {
        return Ok(Vec::new());
    };

    let args = log_args(days, author);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = runner.run(repo, &args).await?;

    let commits = parse_log_output(&output);
    debug!(repo = %repo.display(), days, count = commits.len(), "listed commits");
    Ok(commits)
}

/// Parse `git log` output produced with [`LOG_FORMAT`]
///
/// Blank lines are skipped. Missing fields default to empty strings; no
/// field is validated.
#[must_use]
pub fn parse_log_output(output: &str) -> Vec<CommitSummary> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_log_line)
        .collect()
}

/// Parse one `git log` line
#[must_use]
pub fn parse_log_line(line: &str) -> CommitSummary {
    let mut fields = line.split(FIELD_SEPARATOR);
    let mut next = || fields.next().unwrap_or_default().to_string();

    CommitSummary {
        hash: next(),
        message: next(),
        author: next(),
        date: next(),
    }
}
