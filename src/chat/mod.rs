//! Chat application module for conversing with the multilingual backend.
//!
//! This module provides the request/response chat lifecycle and the REPL
//! plumbing built on top of the samvad client library. It supports:
//!
//! - Single-flight sends with guaranteed re-enable on every outcome
//! - Slash commands for session control
//! - Configurable endpoint, language, and display preferences
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and backend interaction
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer, Theme};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{
    ChatSession, FALLBACK_REPLY, SendOutcome, SessionStats, UNREACHABLE_NOTICE, WELCOME_NOTICE,
};
