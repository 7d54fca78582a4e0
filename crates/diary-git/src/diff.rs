//! Patch retrieval for a single commit

use std::path::Path;

use crate::error::GitError;
use crate::runner::ProcessRunner;

/// Fetch the patch body of `hash`, with the commit header suppressed
///
/// # Errors
///
/// Returns `GitError` if `git show` cannot be run or exits non-zero.
pub async fn fetch_diff<R>(runner: &R, repo: &Path, hash: &str) -> Result<String, GitError>
where
    R: ProcessRunner + ?Sized,
{
    runner.run(repo, &["show", "--format=", hash]).await
}
