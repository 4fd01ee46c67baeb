//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the backend.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the transcript and the last bot reply.
    Clear,

    /// Export the transcript to a text file, optionally into a directory.
    Export(Option<String>),

    /// Speak the last bot reply aloud.
    Speak,

    /// Capture one spoken utterance and send it.
    Listen,

    /// Change the conversation language.
    Lang(String),

    /// Toggle the dark theme.
    Dark,

    /// Display session statistics (message count, language, endpoint).
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use samvad::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/lang hi").is_some());
/// assert!(parse_command("Hello there!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "export" | "download" => ChatCommand::Export(argument.map(|s| s.to_string())),
        "speak" | "tts" => ChatCommand::Speak,
        "listen" | "mic" => ChatCommand::Listen,
        "lang" | "language" => match argument {
            Some(code) => ChatCommand::Lang(code.to_string()),
            None => ChatCommand::Invalid("/lang requires a language code (en, hi, mr)".to_string()),
        },
        "dark" => ChatCommand::Dark,
        "stats" | "status" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /clear                 Clear the transcript
  /export [dir]          Save the transcript as a text file
  /speak                 Speak the last bot reply aloud
  /listen                Capture one spoken utterance and send it
  /lang <en|hi|mr>       Change the conversation language
  /dark                  Toggle the dark theme
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}
