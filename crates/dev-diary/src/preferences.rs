// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Persisted user preferences
//!
//! A small JSON document remembering the last scan directory, output path
//! and day window. Reading never fails: a missing, unreadable or malformed
//! file loads as the empty document. Writing never fails the caller either;
//! errors are logged and swallowed.
//!
//! ```json
//! {
//!   "directory": "/home/dev/projects",
//!   "outputPath": "/home/dev/Documents/dev-diary",
//!   "daysToInclude": 7
//! }
//! ```
//!
//! Earlier releases kept the file under `~/.config/dev-dairy/`. That
//! location is still read when the current one does not exist yet; saves
//! always go to the current location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Directory under the user's config root holding the preference file
pub const CONFIG_DIR_NAME: &str = "dev-diary";

/// Directory used by earlier releases, read as a fallback
pub const LEGACY_CONFIG_DIR_NAME: &str = "dev-dairy";

/// File name of the preference document
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors raised internally while reading or writing preferences
///
/// These never escape [`PreferenceStore::load`] or [`PreferenceStore::save`].
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// Error reading or writing the file
    #[error("IO error on {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PreferencesError {
    fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Choices remembered between runs; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPreferences {
    /// Last directory scanned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Where summaries are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Trailing window in days
    ///
    /// Anything other than a non-negative whole number reads as `None`
    /// without invalidating the other fields.
    #[serde(
        default,
        deserialize_with = "lenient_days",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_to_include: Option<u32>,
}

impl PersistedPreferences {
    /// Check if nothing is remembered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directory.is_none() && self.output_path.is_none() && self.days_to_include.is_none()
    }
}

fn lenient_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(days_from_json))
}

/// Whole numbers only; `3.0` counts as 3
fn days_from_json(value: &serde_json::Value) -> Option<u32> {
    let whole = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64)
    })?;
    u32::try_from(whole).ok()
}

/// Reads and writes [`PersistedPreferences`] at a fixed path
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    legacy_path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Store at an explicit file path
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            legacy_path: None,
        }
    }

    /// Also read `path` when the primary file does not exist
    #[must_use]
    pub fn with_legacy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.legacy_path = Some(path.into());
        self
    }

    /// Store at `~/.config/dev-diary/config.json`, falling back to
    /// `~/.config/dev-dairy/config.json` for reads
    ///
    /// The same location is used on every platform. Falls back to a path
    /// relative to the current directory if the home directory is unknown.
    #[must_use]
    pub fn default_location() -> Self {
        let home = dirs::home_dir();
        Self::at(default_config_path(home.as_deref()))
            .with_legacy_path(legacy_config_path(home.as_deref()))
    }

    /// Path of the preference file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path read when [`Self::path`] does not exist
    #[must_use]
    pub fn legacy_path(&self) -> Option<&Path> {
        self.legacy_path.as_deref()
    }

    /// Load preferences, blocking; any failure yields the empty document
    #[must_use]
    pub fn load_sync(&self) -> PersistedPreferences {
        let mut content = read_sync(&self.path);
        if let Some(legacy) = self.legacy_fallback(&content) {
            content = read_sync(legacy);
        }
        self.decode_or_default(content)
    }

    /// Load preferences; any failure yields the empty document
    pub async fn load(&self) -> PersistedPreferences {
        let mut content = read(&self.path).await;
        if let Some(legacy) = self.legacy_fallback(&content) {
            content = read(legacy).await;
        }
        self.decode_or_default(content)
    }

    /// Save preferences as indented JSON, creating the directory if needed
    ///
    /// Failures are logged at error level and otherwise ignored.
    pub async fn save(&self, preferences: &PersistedPreferences) {
        match self.try_save(preferences).await {
            Ok(()) => debug!(path = %self.path.display(), "saved preferences"),
            Err(err) => error!(path = %self.path.display(), %err, "Failed to save preferences"),
        }
    }

    async fn try_save(&self, preferences: &PersistedPreferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| PreferencesError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let json = serde_json::to_string_pretty(preferences)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| PreferencesError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn legacy_fallback(&self, content: &Result<String, PreferencesError>) -> Option<&Path> {
        let legacy = self.legacy_path.as_deref()?;
        match content {
            Err(err) if err.is_not_found() => {
                debug!(path = %legacy.display(), "reading preferences from legacy location");
                Some(legacy)
            }
            _ => None,
        }
    }

    fn decode_or_default(
        &self,
        content: Result<String, PreferencesError>,
    ) -> PersistedPreferences {
        match content.and_then(|text| Ok(serde_json::from_str::<PersistedPreferences>(&text)?)) {
            Ok(preferences) => preferences,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "using empty preferences");
                PersistedPreferences::default()
            }
        }
    }
}

fn read_sync(path: &Path) -> Result<String, PreferencesError> {
    std::fs::read_to_string(path).map_err(|source| PreferencesError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn read(path: &Path) -> Result<String, PreferencesError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// `<home>/.config/dev-diary/config.json`
#[must_use]
pub fn default_config_path(home: Option<&Path>) -> PathBuf {
    config_path_in(home, CONFIG_DIR_NAME)
}

/// `<home>/.config/dev-dairy/config.json`, written by earlier releases
#[must_use]
pub fn legacy_config_path(home: Option<&Path>) -> PathBuf {
    config_path_in(home, LEGACY_CONFIG_DIR_NAME)
}

fn config_path_in(home: Option<&Path>, dir_name: &str) -> PathBuf {
    home.map(Path::to_path_buf)
        .unwrap_or_default()
        .join(".config")
        .join(dir_name)
        .join(CONFIG_FILE_NAME)
}
