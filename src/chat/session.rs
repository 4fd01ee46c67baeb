//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript
//! and drives one request/response exchange at a time against the backend.

use std::path::{Path, PathBuf};

use crate::chat::config::ChatConfig;
use crate::client::{BackendClient, ChatRequest, Transport};
use crate::error::{Error, Result};
use crate::export;
use crate::language::Language;
use crate::observability;
use crate::render::Renderer;
use crate::transcript::{Sender, Transcript};

/// Fixed reply substituted when a successful response carries no usable
/// `reply` field.
pub const FALLBACK_REPLY: &str = "Sorry, I didn't get that.";

/// Bot-channel notice appended when the backend cannot be reached.
pub const UNREACHABLE_NOTICE: &str = "Network error: cannot reach backend";

/// Greeting appended to the transcript at startup.
pub const WELCOME_NOTICE: &str =
    "Hi! This is a multilingual chatbot. Select language and start typing.";

/// How one send resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The input was empty after trimming; nothing was sent.
    Ignored,
    /// The backend replied. This includes the fallback text substituted for
    /// a missing or malformed reply body.
    Replied(String),
    /// The backend answered with a non-success status.
    ServerError(u16),
    /// The backend could not be reached.
    Unreachable,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The endpoint exchanges are posted to.
    pub endpoint: Option<String>,
    /// The active conversation language.
    pub language: Language,
    /// The number of messages in the transcript.
    pub message_count: usize,
    /// The number of completed exchanges, successful or not.
    pub exchange_count: u64,
    /// Whether a bot reply is available for voice output.
    pub has_last_reply: bool,
}

/// A chat session that manages the transcript and backend interactions.
///
/// The session enforces single-flight sends: at most one exchange is
/// pending at a time, and the pending flag is cleared on every resolution
/// path so the send affordance always comes back.
pub struct ChatSession<T: Transport> {
    transport: T,
    config: ChatConfig,
    transcript: Transcript,
    language: Language,
    pending: bool,
    last_bot_reply: Option<String>,
    exchange_count: u64,
}

impl ChatSession<BackendClient> {
    /// Creates a new chat session with the given client and configuration.
    pub fn new(client: BackendClient, config: ChatConfig) -> Self {
        Self::with_transport(client, config)
    }
}

impl<T: Transport> ChatSession<T> {
    /// Creates a new chat session over a custom transport.
    pub fn with_transport(transport: T, config: ChatConfig) -> Self {
        let language = config.language;
        Self {
            transport,
            config,
            transcript: Transcript::new(),
            language,
            pending: false,
            last_bot_reply: None,
            exchange_count: 0,
        }
    }

    /// Sends a user message and resolves the exchange.
    ///
    /// This method:
    /// 1. Ignores input that is empty after trimming
    /// 2. Rejects the send if an exchange is already pending
    /// 3. Appends the user message, strictly before any bot message
    /// 4. Posts `{ text, lang }` to the backend and awaits the reply
    /// 5. Appends the bot reply or an error surrogate to the transcript
    ///
    /// Server errors and unreachable backends resolve to an outcome, not an
    /// `Err`: they are surfaced as bot-channel notices and the user retries
    /// manually. The pending flag is cleared on every path.
    ///
    /// # Errors
    ///
    /// Returns a busy error if an exchange is already in flight.
    pub async fn send(&mut self, input: &str, renderer: &mut dyn Renderer) -> Result<SendOutcome> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }
        if self.pending {
            observability::SESSION_REJECTED_SENDS.click();
            return Err(Error::busy("a send is already in flight"));
        }

        let message = self.transcript.push(Sender::User, text);
        renderer.print_message(message);

        let request = ChatRequest {
            text: text.to_string(),
            lang: self.language,
        };
        self.pending = true;
        let result = self.transport.exchange(&request).await;
        self.pending = false;

        let outcome = match result {
            Ok(reply) => {
                let reply = reply.reply.unwrap_or_else(|| FALLBACK_REPLY.to_string());
                self.last_bot_reply = Some(reply.clone());
                let message = self.transcript.push(Sender::Bot, reply.as_str());
                renderer.print_message(message);
                SendOutcome::Replied(reply)
            }
            // A transport that reports a malformed success body as an error
            // still resolves as a successful exchange with the fallback.
            Err(err) if err.is_serialization() => {
                let reply = FALLBACK_REPLY.to_string();
                self.last_bot_reply = Some(reply.clone());
                let message = self.transcript.push(Sender::Bot, reply.as_str());
                renderer.print_message(message);
                SendOutcome::Replied(reply)
            }
            Err(err) => match err.status_code() {
                Some(status) => {
                    let message = self
                        .transcript
                        .push(Sender::Bot, format!("Server error: {status}"));
                    renderer.print_message(message);
                    SendOutcome::ServerError(status)
                }
                None => {
                    let message = self.transcript.push(Sender::Bot, UNREACHABLE_NOTICE);
                    renderer.print_message(message);
                    SendOutcome::Unreachable
                }
            },
        };

        observability::SESSION_EXCHANGES.click();
        self.exchange_count += 1;
        Ok(outcome)
    }

    /// Appends a bot-channel notice to the transcript, outside any exchange.
    ///
    /// Used for the startup greeting; the notice participates in export
    /// like any other message but does not touch the last bot reply.
    pub fn announce(&mut self, text: &str, renderer: &mut dyn Renderer) {
        let message = self.transcript.push(Sender::Bot, text);
        renderer.print_message(message);
    }

    /// Clears the transcript and the last bot reply.
    ///
    /// Clearing does not resolve an in-flight exchange; the pending flag is
    /// left untouched.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.last_bot_reply = None;
    }

    /// Exports the transcript to a text file in `dir`.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = export::write_export(&self.transcript, dir)?;
        observability::TRANSCRIPT_EXPORTS.click();
        Ok(path)
    }

    /// The transcript so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The number of messages in the transcript.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// The most recent bot reply, if any.
    pub fn last_bot_reply(&self) -> Option<&str> {
        self.last_bot_reply.as_deref()
    }

    /// Returns true while an exchange is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The active conversation language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Changes the conversation language for subsequent sends.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// The session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            endpoint: self.config.endpoint.clone(),
            language: self.language,
            message_count: self.message_count(),
            exchange_count: self.exchange_count,
            has_last_reply: self.last_bot_reply.is_some(),
        }
    }
}
