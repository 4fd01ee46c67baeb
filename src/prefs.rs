//! Display and language preferences.
//!
//! Dark mode is persisted as a marker on every change and read back before
//! first paint. The conversation language resets to English each session
//! unless language persistence is explicitly enabled, preserving the
//! asymmetry of the original behavior while making it configurable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::language::Language;

/// The preferences in effect for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    /// Conversation language for sends, recognition, and synthesis.
    pub language: Language,
    /// Whether the dark theme is active.
    pub dark_mode: bool,
}

/// On-disk shape. The `dark` key is written only while dark mode is on, so
/// presence of the key is what survives a reload.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default, skip_serializing_if = "is_false")]
    dark: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lang: Option<Language>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// File-backed store for [`Preferences`].
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    persist_language: bool,
}

impl PreferenceStore {
    /// Creates a store backed by the given file. Language persistence is off
    /// by default; see [`PreferenceStore::with_language_persistence`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            persist_language: false,
        }
    }

    /// Enables or disables persisting the language choice across sessions.
    pub fn with_language_persistence(mut self, enabled: bool) -> Self {
        self.persist_language = enabled;
        self
    }

    /// The conventional preferences path under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("samvad").join("prefs.json"))
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads preferences from disk. A missing file yields defaults; the
    /// persisted language is ignored unless language persistence is enabled.
    pub fn load(&self) -> Result<Preferences> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(err) => return Err(Error::io("failed to read preferences", err)),
        };
        let file: PrefsFile = serde_json::from_slice(&bytes)
            .map_err(|err| Error::serialization("failed to parse preferences", Some(Box::new(err))))?;
        let language = if self.persist_language {
            file.lang.unwrap_or_default()
        } else {
            Language::default()
        };
        Ok(Preferences {
            language,
            dark_mode: file.dark,
        })
    }

    /// Persists preferences, creating parent directories as needed.
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| Error::io("failed to create preferences directory", err))?;
        }
        let file = PrefsFile {
            dark: prefs.dark_mode,
            lang: self.persist_language.then_some(prefs.language),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json).map_err(|err| Error::io("failed to write preferences", err))
    }
}
