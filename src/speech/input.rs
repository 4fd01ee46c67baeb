//! Voice input: one recognized utterance fed into the compose path.

use crate::error::{Error, Result};
use crate::language::Language;
use crate::observability;

use super::{Capability, SpeechRecognizer};

/// Wraps an optional speech-recognition capability.
///
/// At most one recognition session is active at a time; the listening flag
/// enforces this explicitly because the platform offers no mutual exclusion
/// of its own.
pub struct VoiceInputBridge {
    recognizer: Capability<Box<dyn SpeechRecognizer>>,
    listening: bool,
}

impl VoiceInputBridge {
    /// Creates a bridge over the given capability.
    pub fn new(recognizer: Capability<Box<dyn SpeechRecognizer>>) -> Self {
        Self {
            recognizer,
            listening: false,
        }
    }

    /// Creates a bridge for a platform without speech recognition.
    pub fn unavailable() -> Self {
        Self::new(Capability::Unavailable)
    }

    /// Returns true if recognition is available on this platform.
    pub fn is_available(&self) -> bool {
        self.recognizer.is_available()
    }

    /// Returns true while a recognition session is active.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Captures a single utterance in the given language.
    ///
    /// Starting a capture while one is active is rejected with a busy
    /// error. The listening flag is cleared on every outcome, success,
    /// silence, or engine failure alike.
    pub async fn capture(&mut self, language: Language) -> Result<String> {
        if self.listening {
            return Err(Error::busy("a recognition session is already active"));
        }
        let recognizer = match &mut self.recognizer {
            Capability::Available(recognizer) => recognizer,
            Capability::Unavailable => {
                return Err(Error::capability(
                    "voice input is not supported on this platform",
                ));
            }
        };
        observability::RECOGNITION_SESSIONS.click();
        self.listening = true;
        let result = recognizer.recognize(language.locale()).await;
        self.listening = false;
        result
    }
}
