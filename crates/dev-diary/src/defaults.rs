//! Default values layered over persisted preferences
//!
//! Each helper is a pure function of the persisted document and an
//! [`Environment`] snapshot, so callers decide when process state is read.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::preferences::PersistedPreferences;

/// Overrides the default output path
pub const OUTPUT_ENV: &str = "DAILY_SUMMARY_OUTPUT";

/// Overrides the default day window
pub const DAYS_ENV: &str = "DAILY_SUMMARY_DAYS";

/// Day windows a persisted preference may select
pub const ALLOWED_DAYS: [u32; 5] = [1, 3, 7, 14, 30];

/// Day window used when nothing else applies
pub const FALLBACK_DAYS: u32 = 1;

/// Snapshot of the process state the defaults depend on
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
    current_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
}

impl Environment {
    /// Capture variables, working directory and home directory of this process
    #[must_use]
    pub fn capture() -> Self {
        Self {
            // Non-UTF-8 entries are skipped
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
            current_dir: std::env::current_dir().ok(),
            home_dir: dirs::home_dir(),
        }
    }

    /// Set a variable
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set the home directory
    #[must_use]
    pub fn with_home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// A variable's value; empty values count as unset
    #[must_use]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Working directory at capture time
    #[must_use]
    pub fn current_dir(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }

    /// Home directory at capture time
    #[must_use]
    pub fn home_dir(&self) -> Option<&PathBuf> {
        self.home_dir.as_ref()
    }
}

/// Directory to scan: persisted value, else the working directory
///
/// A persisted empty path counts as unset.
#[must_use]
pub fn default_directory(prefs: &PersistedPreferences, env: &Environment) -> PathBuf {
    prefs
        .directory
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| env.current_dir().cloned())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Output path: persisted value, else `DAILY_SUMMARY_OUTPUT`, else
/// `<home>/Documents/dev-diary`
#[must_use]
pub fn default_output_path(prefs: &PersistedPreferences, env: &Environment) -> PathBuf {
    if let Some(path) = prefs.output_path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        return path.clone();
    }
    if let Some(path) = env.var(OUTPUT_ENV) {
        return PathBuf::from(path);
    }
    env.home_dir()
        .cloned()
        .unwrap_or_default()
        .join("Documents")
        .join("dev-diary")
}

/// Day window: persisted value if in [`ALLOWED_DAYS`], else
/// `DAILY_SUMMARY_DAYS`, else [`FALLBACK_DAYS`]
///
/// An unparseable `DAILY_SUMMARY_DAYS` is treated as unset.
#[must_use]
pub fn default_days(prefs: &PersistedPreferences, env: &Environment) -> u32 {
    if let Some(days) = prefs.days_to_include.filter(|d| ALLOWED_DAYS.contains(d)) {
        return days;
    }
    env.var(DAYS_ENV)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(FALLBACK_DAYS)
}
