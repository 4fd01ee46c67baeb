//! Output rendering for the chat transcript.
//!
//! This module provides the renderer trait and a plain-text implementation
//! with optional ANSI styling. Rendering is a projection of transcript
//! state: every entry shows sender-based styling, the message body, and a
//! timestamp derived from the message's creation instant.

use std::io::{self, Stdout, Write};

use crate::transcript::{Message, Sender, Transcript, format_timestamp};

/// ANSI escape code for dim text (used for timestamps).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (user label, light theme).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for bright cyan text (user label, dark theme).
const ANSI_BRIGHT_CYAN: &str = "\x1b[96m";

/// ANSI escape code for green text (bot label, light theme).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for bright green text (bot label, dark theme).
const ANSI_BRIGHT_GREEN: &str = "\x1b[92m";

/// Visual theme selected by the dark-mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Default palette.
    #[default]
    Light,
    /// Brighter palette for dark terminals.
    Dark,
}

/// Trait for rendering transcript output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, unstyled text for piping, or a test double that
/// records calls.
pub trait Renderer: Send {
    /// Print a newly appended message.
    ///
    /// Output appends newest-last, which is the terminal equivalent of
    /// scrolling the newest message into view after every append.
    fn print_message(&mut self, message: &Message);

    /// Repaint the entire transcript, in order.
    fn print_transcript(&mut self, transcript: &Transcript) {
        for message in transcript.messages() {
            self.print_message(message);
        }
    }

    /// Print an informational notice outside the transcript.
    fn print_info(&mut self, info: &str);

    /// Print an error notice outside the transcript.
    fn print_error(&mut self, error: &str);

    /// Called when the voice-capture listening state changes.
    fn set_listening(&mut self, listening: bool) {
        _ = listening;
    }
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    theme: Theme,
    listening: bool,
}

impl PlainTextRenderer {
    /// Creates a new renderer with ANSI colors enabled and the light theme.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new renderer with the specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            theme: Theme::default(),
            listening: false,
        }
    }

    /// Switches the color palette between light and dark.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// The active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns true while a voice capture is in progress.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    fn label(sender: Sender) -> &'static str {
        match sender {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }

    fn label_color(&self, sender: Sender) -> &'static str {
        match (sender, self.theme) {
            (Sender::User, Theme::Light) => ANSI_CYAN,
            (Sender::User, Theme::Dark) => ANSI_BRIGHT_CYAN,
            (Sender::Bot, Theme::Light) => ANSI_GREEN,
            (Sender::Bot, Theme::Dark) => ANSI_BRIGHT_GREEN,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &Message) {
        let stamp = format_timestamp(message.sent_at);
        let label = Self::label(message.sender);
        if self.use_color {
            let color = self.label_color(message.sender);
            println!(
                "{ANSI_DIM}[{stamp}]{ANSI_RESET} {color}{label}:{ANSI_RESET} {}",
                message.body
            );
        } else {
            println!("[{stamp}] {label}: {}", message.body);
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("Error: {error}");
    }

    fn set_listening(&mut self, listening: bool) {
        if listening && !self.listening {
            println!("[listening]");
            self.flush();
        }
        self.listening = listening;
    }
}
