// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! diary-git: Git activity aggregation for dev-diary
//!
//! This library crate finds the commits the current user authored in a set
//! of local repositories over the last few days and pairs each with its
//! full patch, ready for summarization.

#![warn(missing_docs)]

//! All git access happens by running the `git` executable through a
//! [`ProcessRunner`]. The pipeline for one repository is:
//!
//! 1. resolve the committer email (local config, then global)
//! 2. list that author's commits within the window
//! 3. fetch every commit's patch concurrently
//!
//! [`ActivityCollector::aggregate_all`] runs this over many repositories in
//! sequence and keeps only the ones with activity.

pub mod aggregate;
pub mod commit;
pub mod diff;
pub mod error;
pub mod identity;
pub mod log;
pub mod repo;
pub mod runner;

#[cfg(test)]
pub(crate) mod fake;

pub use aggregate::{ActivityCollector, ActivityRecord, ProgressFn};
pub use commit::{CommitRecord, CommitSummary};
pub use error::GitError;
pub use repo::RepositoryHandle;
pub use runner::{GitCli, ProcessRunner};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::{ActivityCollector, ActivityRecord};
    pub use crate::commit::{CommitRecord, CommitSummary};
    pub use crate::error::GitError;
    pub use crate::repo::RepositoryHandle;
    pub use crate::runner::{GitCli, ProcessRunner};
}
