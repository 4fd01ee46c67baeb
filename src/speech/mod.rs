//! Optional speech capabilities.
//!
//! Platform speech engines may be absent, so they are modeled as
//! [`Capability`] values: callers branch on the variant instead of probing
//! globals. The engine seams are async traits with a single resolution per
//! invocation, which lets the voice bridges compose with the send lifecycle
//! the same way the network transport does.

mod input;
mod output;

pub use input::VoiceInputBridge;
pub use output::{VoiceOutputBridge, select_voice};

use async_trait::async_trait;

use crate::error::Result;

/// An optional platform capability.
pub enum Capability<T> {
    /// The capability is present; the handle drives it.
    Available(T),
    /// The capability is absent on this platform.
    Unavailable,
}

impl<T> Capability<T> {
    /// Returns true if the capability is present.
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }
}

/// A single-utterance speech recognition engine.
#[async_trait]
pub trait SpeechRecognizer: Send {
    /// Listens for one utterance in the given locale and resolves with its
    /// transcript, or with an error on silence timeout or engine failure.
    async fn recognize(&mut self, locale: &str) -> Result<String>;
}

/// A voice offered by a synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Engine-specific voice name.
    pub name: String,
    /// BCP 47 locale tag the voice speaks.
    pub locale: String,
}

/// A synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// The text to speak.
    pub text: String,
    /// BCP 47 locale tag for pronunciation.
    pub locale: String,
    /// Voice to speak with; `None` selects the engine default.
    pub voice: Option<String>,
    /// Speaking rate, where `1.0` is normal.
    pub rate: f32,
}

/// A speech synthesis engine.
#[async_trait]
pub trait SpeechSynthesizer: Send {
    /// The voices the engine offers.
    fn voices(&self) -> Vec<Voice>;

    /// Stops any in-flight utterance.
    fn cancel(&mut self);

    /// Speaks one utterance to completion.
    async fn speak(&mut self, utterance: Utterance) -> Result<()>;
}
