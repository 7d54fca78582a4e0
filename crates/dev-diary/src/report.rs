// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The activity report handed to summarization

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use diary_git::ActivityRecord;
use serde::{Deserialize, Serialize};

/// Every active repository's commits for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
    /// Trailing window in days
    pub days: u32,
    /// Where the summary of this report is to be written
    pub output_path: PathBuf,
    /// Repositories with at least one qualifying commit
    pub repositories: Vec<ActivityRecord>,
}

impl ActivityReport {
    /// Assemble a report stamped with the current time
    #[must_use]
    pub fn new(days: u32, output_path: PathBuf, repositories: Vec<ActivityRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            days,
            output_path,
            repositories,
        }
    }

    /// Commits across all repositories
    #[must_use]
    pub fn total_commits(&self) -> usize {
        self.repositories.iter().map(ActivityRecord::commit_count).sum()
    }

    /// Check if no repository had activity
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
