//! Command-line configuration for dev-diary
//!
//! Explicit flags win over remembered preferences, which win over
//! environment overrides and built-in fallbacks (see [`crate::defaults`]).

use std::path::PathBuf;

use clap::Parser;
use diary_git::RepositoryHandle;

use crate::defaults::{
    ALLOWED_DAYS, Environment, default_days, default_directory, default_output_path,
};
use crate::preferences::PersistedPreferences;

/// dev-diary - collect your recent commits across repositories
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dev-diary")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Repositories to scan
    ///
    /// Defaults to the remembered directory, or the current directory.
    #[arg(value_name = "REPO")]
    pub repos: Vec<PathBuf>,

    /// Number of trailing days to include
    ///
    /// Defaults to the remembered window, then DAILY_SUMMARY_DAYS, then 1.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Where the summary is to be written
    ///
    /// Defaults to the remembered path, then DAILY_SUMMARY_OUTPUT, then
    /// ~/Documents/dev-diary.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Remember the directory, output path and day window for next time
    #[arg(long, default_value = "false")]
    pub remember: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr; stdout carries only the report.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Settings for one run after all defaults are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Validated repositories, in command-line order
    pub repositories: Vec<RepositoryHandle>,
    /// Trailing window in days
    pub days: u32,
    /// Summary destination
    pub output_path: PathBuf,
}

impl Config {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Repository paths to scan, before validation
    #[must_use]
    pub fn repository_paths(
        &self,
        prefs: &PersistedPreferences,
        env: &Environment,
    ) -> Vec<PathBuf> {
        if self.repos.is_empty() {
            vec![default_directory(prefs, env)]
        } else {
            self.repos.clone()
        }
    }

    /// Apply defaults and validate repository paths
    ///
    /// # Errors
    ///
    /// Returns an error if a repository path doesn't exist or isn't a
    /// directory.
    pub fn resolve(
        &self,
        prefs: &PersistedPreferences,
        env: &Environment,
    ) -> Result<RunSettings, ConfigError> {
        let repositories = self
            .repository_paths(prefs, env)
            .into_iter()
            .map(validate_repository)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RunSettings {
            repositories,
            days: self.days.unwrap_or_else(|| default_days(prefs, env)),
            output_path: self
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(prefs, env)),
        })
    }
}

impl RunSettings {
    /// Preferences to persist after this run
    ///
    /// The directory is only remembered when a single repository was
    /// scanned, and the day window only when it is one of
    /// [`ALLOWED_DAYS`]; otherwise the previous values are kept.
    #[must_use]
    pub fn to_preferences(&self, previous: &PersistedPreferences) -> PersistedPreferences {
        let directory = match self.repositories.as_slice() {
            [only] => Some(only.path.clone()),
            _ => previous.directory.clone(),
        };
        let days_to_include = if ALLOWED_DAYS.contains(&self.days) {
            Some(self.days)
        } else {
            previous.days_to_include
        };

        PersistedPreferences {
            directory,
            output_path: Some(self.output_path.clone()),
            days_to_include,
        }
    }
}

fn validate_repository(path: PathBuf) -> Result<RepositoryHandle, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::RepositoryNotFound(path));
    }
    if !path.is_dir() {
        return Err(ConfigError::RepositoryNotDirectory(path));
    }
    let absolute = std::fs::canonicalize(&path)
        .map_err(|e| ConfigError::RepositoryUnreadable(path.clone(), e))?;
    Ok(RepositoryHandle::from_path(absolute))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepositoryNotDirectory(PathBuf),

    /// Repository path could not be resolved to an absolute path
    #[error("Failed to resolve repository path {0}: {1}")]
    RepositoryUnreadable(PathBuf, std::io::Error),
}
