//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::language::Language;

/// Command-line arguments for the samvad-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Backend endpoint to post exchanges to.
    #[arrrg(optional, "Backend chat endpoint URL", "URL")]
    pub endpoint: Option<String>,

    /// Initial conversation language.
    #[arrrg(optional, "Conversation language: en, hi, or mr (default: en)", "LANG")]
    pub lang: Option<String>,

    /// Directory transcript exports are written to.
    #[arrrg(optional, "Directory for transcript exports (default: current)", "DIR")]
    pub export_dir: Option<String>,

    /// Preferences file location.
    #[arrrg(optional, "Preferences file path", "PATH")]
    pub prefs: Option<String>,

    /// Persist the language choice across sessions.
    #[arrrg(flag, "Persist the language choice across sessions")]
    pub persist_language: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Backend endpoint; `None` selects the client's default local endpoint.
    pub endpoint: Option<String>,

    /// The conversation language at startup.
    pub language: Language,

    /// Directory transcript exports are written to.
    pub export_dir: PathBuf,

    /// Preferences file; `None` selects the conventional config-dir path.
    pub prefs_path: Option<PathBuf>,

    /// Whether the language choice is persisted across sessions. Off by
    /// default: only dark mode survives a reload unless this is enabled.
    pub persist_language: bool,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Endpoint: the client's default local endpoint
    /// - Language: en
    /// - Export directory: current directory
    /// - Language persistence: disabled
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            endpoint: None,
            language: Language::En,
            export_dir: PathBuf::from("."),
            prefs_path: None,
            persist_language: false,
            use_color: true,
        }
    }

    /// Sets the backend endpoint.
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the startup language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets the export directory.
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Sets the preferences file path.
    pub fn with_prefs_path(mut self, path: Option<PathBuf>) -> Self {
        self.prefs_path = path;
        self
    }

    /// Enables or disables language persistence.
    pub fn with_language_persistence(mut self, enabled: bool) -> Self {
        self.persist_language = enabled;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        // Unrecognized language codes fall back to English rather than
        // refusing to start.
        let language = args
            .lang
            .and_then(|s| s.parse::<Language>().ok())
            .unwrap_or_default();

        ChatConfig {
            endpoint: args.endpoint,
            language,
            export_dir: args.export_dir.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
            prefs_path: args.prefs.map(PathBuf::from),
            persist_language: args.persist_language,
            use_color: !args.no_color,
        }
    }
}
