// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-repository and fleet-wide activity aggregation
//!
//! Within one repository every commit's diff is fetched concurrently and
//! joined in listing order. Repositories are processed one after another,
//! so at most one repository's worth of `git show` children run at once.
//!
//! # Example
//!
//! ```no_run
//! use diary_git::{ActivityCollector, GitCli, RepositoryHandle};
//!
//! # async fn run() -> Result<(), diary_git::GitError> {
//! let collector = ActivityCollector::new(GitCli::new());
//! let repos = vec![RepositoryHandle::from_path("/home/dev/projects/api")];
//! let report = |current: usize, total: usize, name: &str| {
//!     eprintln!("[{current}/{total}] {name}");
//! };
//! for record in collector.aggregate_all(&repos, 7, Some(&report)).await? {
//!     println!("{}: {} commits", record.repo.name, record.commit_count());
//! }
//! # Ok(())
//! # }
//! ```

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commit::{CommitRecord, CommitSummary};
use crate::diff::fetch_diff;
use crate::error::GitError;
use crate::identity::resolve_email;
use crate::log::list_commits;
use crate::repo::RepositoryHandle;
use crate::runner::ProcessRunner;

/// Progress callback: `(current, total, repo_name)`, `current` starting at 1
pub type ProgressFn<'a> = dyn Fn(usize, usize, &str) + Send + Sync + 'a;

/// The current user's recent commits in one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Repository the commits came from
    pub repo: RepositoryHandle,
    /// Commits in the order git listed them
    pub commits: Vec<CommitRecord>,
}

impl ActivityRecord {
    /// Check if no commits qualified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Number of qualifying commits
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }
}

/// Collects activity records through a [`ProcessRunner`]
#[derive(Debug, Clone)]
pub struct ActivityCollector<R> {
    runner: R,
}

impl<R: ProcessRunner> ActivityCollector<R> {
    /// Create a collector driving git through `runner`
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// The underlying runner
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Build the activity record for one repository
    ///
    /// A repository without a committer identity yields an empty record.
    ///
    /// # Errors
    ///
    /// Any failing `git log` or `git show` fails the whole repository; no
    /// partial record is returned.
    pub async fn aggregate(
        &self,
        repo: &RepositoryHandle,
        days: u32,
    ) -> Result<ActivityRecord, GitError> {
        let identity = resolve_email(&self.runner, &repo.path).await?;
        let summaries = list_commits(&self.runner, &repo.path, days, identity.as_deref()).await?;

        let commits = try_join_all(
            summaries
                .into_iter()
                .map(|summary| self.with_diff(repo, summary)),
        )
        .await?;

        debug!(repo = %repo.name, count = commits.len(), "aggregated repository");
        Ok(ActivityRecord {
            repo: repo.clone(),
            commits,
        })
    }

    /// Aggregate `repos` in order, keeping only those with commits
    ///
    /// `on_progress` is called before each repository starts.
    ///
    /// # Errors
    ///
    /// The first failing repository aborts the run; records gathered so far
    /// are discarded.
    pub async fn aggregate_all(
        &self,
        repos: &[RepositoryHandle],
        days: u32,
        on_progress: Option<&ProgressFn<'_>>,
    ) -> Result<Vec<ActivityRecord>, GitError> {
        let total = repos.len();
        let mut records = Vec::new();

        for (index, repo) in repos.iter().enumerate() {
            if let Some(report) = on_progress {
                report(index + 1, total, &repo.name);
            }

            let record = self
                .aggregate(repo, days)
                .await
                .inspect_err(|err| warn!(repo = %repo.name, %err, "aggregation failed"))?;

            if record.is_empty() {
                debug!(repo = %repo.name, "no qualifying commits, dropping");
                continue;
            }
            records.push(record);
        }

        info!(
            scanned = total,
            active = records.len(),
            days,
            "aggregated repositories"
        );
        Ok(records)
    }

    async fn with_diff(
        &self,
        repo: &RepositoryHandle,
        summary: CommitSummary,
    ) -> Result<CommitRecord, GitError> {
        let diff = fetch_diff(&self.runner, &repo.path, &summary.hash).await?;
        Ok(CommitRecord::new(summary, diff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::ScriptedRunner;
    use crate::log::log_args;
    use similar_asserts::assert_eq;
    use std::sync::Mutex;
    use std::time::Duration;

    const EMAIL: &str = "me@example.com";

    struct FakeCommit {
        hash: &'static str,
        subject: &'static str,
        delay_ms: u64,
    }

    fn fake(hash: &'static str, subject: &'static str, delay_ms: u64) -> FakeCommit {
        FakeCommit {
            hash,
            subject,
            delay_ms,
        }
    }

    /// Script identity, log and show responses for one repository
    fn script_repo(
        runner: ScriptedRunner,
        path: &str,
        days: u32,
        commits: &[FakeCommit],
    ) -> ScriptedRunner {
        let log = log_args(days, EMAIL);
        let log: Vec<&str> = log.iter().map(String::as_str).collect();
        let output: Vec<String> = commits
            .iter()
            .map(|c| format!("{}|{}|Me|2026-01-17 02:33:06 +0000", c.hash, c.subject))
            .collect();

        let mut runner = runner
            .respond(path, &["config", "--local", "user.email"], EMAIL)
            .respond(path, &log, &output.join("\n"));
        for c in commits {
            runner = runner.respond_after(
                path,
                &["show", "--format=", c.hash],
                &format!("patch for {}", c.hash),
                Duration::from_millis(c.delay_ms),
            );
        }
        runner
    }

    fn no_identity(runner: ScriptedRunner, path: &str) -> ScriptedRunner {
        runner
            .fail(path, &["config", "--local", "user.email"], 1)
            .fail(path, &["config", "--global", "user.email"], 1)
    }

    #[tokio::test]
    async fn test_aggregate_without_identity_is_empty() {
        let collector = ActivityCollector::new(no_identity(ScriptedRunner::new(), "/repo"));
        let record = collector
            .aggregate(&RepositoryHandle::new("repo", "/repo"), 1)
            .await
            .unwrap();

        assert!(record.is_empty());
        assert_eq!(record.repo.name, "repo");
        // Only the two identity lookups ran
        assert_eq!(collector.runner().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_aggregate_attaches_matching_diffs() {
        let runner = script_repo(
            ScriptedRunner::new(),
            "/repo",
            7,
            &[fake("aaa111", "first", 0), fake("bbb222", "second", 0)],
        );
        let collector = ActivityCollector::new(runner);
        let record = collector
            .aggregate(&RepositoryHandle::new("repo", "/repo"), 7)
            .await
            .unwrap();

        assert_eq!(record.commit_count(), 2);
        for commit in &record.commits {
            assert!(!commit.hash().is_empty());
            assert_eq!(commit.diff, format!("patch for {}", commit.hash()));
        }
    }

    #[tokio::test]
    async fn test_aggregate_preserves_order_despite_completion_timing() {
        // The first commit's diff finishes last
        let runner = script_repo(
            ScriptedRunner::new(),
            "/repo",
            1,
            &[
                fake("c1", "one", 60),
                fake("c2", "two", 30),
                fake("c3", "three", 0),
            ],
        );
        let collector = ActivityCollector::new(runner);
        let record = collector
            .aggregate(&RepositoryHandle::new("repo", "/repo"), 1)
            .await
            .unwrap();

        let hashes: Vec<&str> = record.commits.iter().map(CommitRecord::hash).collect();
        assert_eq!(hashes, vec!["c1", "c2", "c3"]);
        let subjects: Vec<&str> = record
            .commits
            .iter()
            .map(|c| c.summary.message.as_str())
            .collect();
        assert_eq!(subjects, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_aggregate_fetches_diffs_concurrently() {
        let runner = script_repo(
            ScriptedRunner::new(),
            "/repo",
            1,
            &[
                fake("c1", "one", 200),
                fake("c2", "two", 200),
                fake("c3", "three", 200),
            ],
        );
        let collector = ActivityCollector::new(runner);

        let started = std::time::Instant::now();
        collector
            .aggregate(&RepositoryHandle::new("repo", "/repo"), 1)
            .await
            .unwrap();
        // Sequential fetches would need at least 600ms
        assert!(started.elapsed() < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_aggregate_diff_failure_fails_repository() {
        let runner = script_repo(
            ScriptedRunner::new(),
            "/repo",
            1,
            &[fake("c1", "one", 0)],
        )
        .fail("/repo", &["show", "--format=", "c1"], 128);
        let collector = ActivityCollector::new(runner);

        let result = collector
            .aggregate(&RepositoryHandle::new("repo", "/repo"), 1)
            .await;
        assert!(matches!(
            result,
            Err(GitError::CommandFailed { status: 128, .. })
        ));
    }

    #[tokio::test]
    async fn test_aggregate_all_drops_inactive_repositories() {
        let runner = script_repo(ScriptedRunner::new(), "/a", 1, &[fake("a1", "work", 0)]);
        let runner = no_identity(runner, "/b");
        let collector = ActivityCollector::new(runner);

        let repos = vec![
            RepositoryHandle::new("A", "/a"),
            RepositoryHandle::new("B", "/b"),
        ];
        let records = collector.aggregate_all(&repos, 1, None).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].repo.name, "A");
    }

    #[tokio::test]
    async fn test_aggregate_all_drops_repository_with_identity_but_no_commits() {
        let runner = script_repo(ScriptedRunner::new(), "/a", 1, &[]);
        let collector = ActivityCollector::new(runner);

        let records = collector
            .aggregate_all(&[RepositoryHandle::new("A", "/a")], 1, None)
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_all_reports_progress_in_order() {
        let runner = script_repo(ScriptedRunner::new(), "/r1", 1, &[fake("x1", "x", 0)]);
        let runner = no_identity(runner, "/r2");
        let runner = script_repo(runner, "/r3", 1, &[fake("z1", "z", 0)]);
        let collector = ActivityCollector::new(runner);

        let repos = vec![
            RepositoryHandle::new("r1", "/r1"),
            RepositoryHandle::new("r2", "/r2"),
            RepositoryHandle::new("r3", "/r3"),
        ];
        let seen = Mutex::new(Vec::new());
        let report = |current: usize, total: usize, name: &str| {
            seen.lock()
                .expect("progress lock")
                .push((current, total, name.to_string()));
        };

        let records = collector
            .aggregate_all(&repos, 1, Some(&report))
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            seen.into_inner().expect("progress lock"),
            vec![
                (1, 3, "r1".to_string()),
                (2, 3, "r2".to_string()),
                (3, 3, "r3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_aggregate_all_processes_repositories_sequentially() {
        let runner = script_repo(
            ScriptedRunner::new(),
            "/a",
            1,
            &[fake("a1", "one", 40), fake("a2", "two", 10)],
        );
        let runner = script_repo(runner, "/b", 1, &[fake("b1", "three", 0)]);
        let collector = ActivityCollector::new(runner);

        let repos = vec![
            RepositoryHandle::new("a", "/a"),
            RepositoryHandle::new("b", "/b"),
        ];
        collector.aggregate_all(&repos, 1, None).await.unwrap();

        let calls = collector.runner().calls();
        let last_a = calls.iter().rposition(|c| c.starts_with("/a:")).unwrap();
        let first_b = calls.iter().position(|c| c.starts_with("/b:")).unwrap();
        assert!(last_a < first_b, "repository b started before a finished");
    }

    #[tokio::test]
    async fn test_aggregate_all_failure_discards_partial_results() {
        let runner = script_repo(ScriptedRunner::new(), "/a", 1, &[fake("a1", "one", 0)]);
        let log = log_args(1, EMAIL);
        let log: Vec<&str> = log.iter().map(String::as_str).collect();
        let runner = runner
            .respond("/b", &["config", "--local", "user.email"], EMAIL)
            .fail("/b", &log, 128);
        let collector = ActivityCollector::new(runner);

        let repos = vec![
            RepositoryHandle::new("a", "/a"),
            RepositoryHandle::new("b", "/b"),
        ];
        let result = collector.aggregate_all(&repos, 1, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_aggregate_all_empty_input() {
        let collector = ActivityCollector::new(ScriptedRunner::new());
        let calls = Mutex::new(0usize);
        let report = |_: usize, _: usize, _: &str| {
            *calls.lock().expect("lock") += 1;
        };
        let records = collector
            .aggregate_all(&[], 1, Some(&report))
            .await
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(calls.into_inner().expect("lock"), 0);
    }
}
