// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod export;
pub mod language;
pub mod observability;
pub mod prefs;
pub mod render;
pub mod speech;
pub mod transcript;

// Re-exports
pub use client::{BackendClient, ChatReply, ChatRequest, Transport};
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use language::{Language, locale_for_code};
pub use observability::register_biometrics;
pub use prefs::{PreferenceStore, Preferences};
pub use render::{PlainTextRenderer, Renderer, Theme};
pub use speech::{
    Capability, SpeechRecognizer, SpeechSynthesizer, Utterance, Voice, VoiceInputBridge,
    VoiceOutputBridge,
};
pub use transcript::{Message, Sender, Transcript};
