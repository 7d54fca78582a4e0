//! Commit summary and record types

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Date layout git emits for the `%ai` placeholder
const AUTHOR_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One commit as listed by `git log`, without its patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Full commit hash
    pub hash: String,
    /// Subject line
    pub message: String,
    /// Author display name
    pub author: String,
    /// Author date exactly as git printed it
    pub date: String,
}

impl CommitSummary {
    /// Validate that a hash is a 40-character hex string
    #[must_use]
    pub fn is_valid_hash(hash: &str) -> bool {
        hash.len() == 40 && hash.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// Parse the author date, or `None` if git printed something unexpected
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.date, AUTHOR_DATE_FORMAT).ok()
    }
}

/// A commit summary together with its full patch text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The listed commit
    #[serde(flatten)]
    pub summary: CommitSummary,
    /// Patch body from `git show --format=`
    pub diff: String,
}

impl CommitRecord {
    /// Attach a patch to a summary
    #[must_use]
    pub fn new(summary: CommitSummary, diff: String) -> Self {
        Self { summary, diff }
    }

    /// Shorthand for the commit hash
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.summary.hash
    }
}
