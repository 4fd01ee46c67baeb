//! Voice output: speaking the last bot reply.

use crate::error::{Error, Result};
use crate::language::Language;
use crate::observability;

use super::{Capability, SpeechSynthesizer, Utterance, Voice};

/// Wraps an optional speech-synthesis capability.
///
/// At most one utterance is active at a time; starting a new one cancels
/// whatever is in flight, so the last request wins.
pub struct VoiceOutputBridge {
    synthesizer: Capability<Box<dyn SpeechSynthesizer>>,
}

impl VoiceOutputBridge {
    /// Creates a bridge over the given capability.
    pub fn new(synthesizer: Capability<Box<dyn SpeechSynthesizer>>) -> Self {
        Self { synthesizer }
    }

    /// Creates a bridge for a platform without speech synthesis.
    pub fn unavailable() -> Self {
        Self::new(Capability::Unavailable)
    }

    /// Returns true if synthesis is available on this platform.
    pub fn is_available(&self) -> bool {
        self.synthesizer.is_available()
    }

    /// Speaks the given bot reply in the given language.
    ///
    /// With no reply to speak this is a no-op and returns `Ok(false)`.
    /// Otherwise the voice is chosen by language-prefix match over the
    /// engine's voice list, falling back to the engine default, and the
    /// utterance is spoken at normal rate. Returns `Ok(true)` once the
    /// utterance completes.
    pub async fn speak_reply(&mut self, reply: Option<&str>, language: Language) -> Result<bool> {
        let Some(text) = reply.filter(|text| !text.is_empty()) else {
            return Ok(false);
        };
        let synthesizer = match &mut self.synthesizer {
            Capability::Available(synthesizer) => synthesizer,
            Capability::Unavailable => {
                return Err(Error::capability(
                    "voice output is not supported on this platform",
                ));
            }
        };
        let locale = language.locale();
        let voice = select_voice(&synthesizer.voices(), locale).map(|voice| voice.name.clone());
        synthesizer.cancel();
        observability::SYNTHESIS_UTTERANCES.click();
        synthesizer
            .speak(Utterance {
                text: text.to_string(),
                locale: locale.to_string(),
                voice,
                rate: 1.0,
            })
            .await?;
        Ok(true)
    }
}

/// Selects a voice whose locale matches the target locale's primary
/// language subtag. Returns `None` when nothing matches, which callers
/// treat as "use the engine default".
pub fn select_voice<'a>(voices: &'a [Voice], locale: &str) -> Option<&'a Voice> {
    let prefix = locale.split('-').next().unwrap_or(locale);
    voices.iter().find(|voice| voice.locale.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct EngineState {
        cancels: usize,
        spoken: Vec<Utterance>,
    }

    struct ScriptedSynthesizer {
        voices: Vec<Voice>,
        state: Arc<Mutex<EngineState>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for ScriptedSynthesizer {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn cancel(&mut self) {
            self.state.lock().unwrap().cancels += 1;
        }

        async fn speak(&mut self, utterance: Utterance) -> Result<()> {
            self.state.lock().unwrap().spoken.push(utterance);
            Ok(())
        }
    }

    fn voice(name: &str, locale: &str) -> Voice {
        Voice {
            name: name.to_string(),
            locale: locale.to_string(),
        }
    }

    fn bridge_with(voices: Vec<Voice>) -> (VoiceOutputBridge, Arc<Mutex<EngineState>>) {
        let state = Arc::new(Mutex::new(EngineState::default()));
        let bridge = VoiceOutputBridge::new(Capability::Available(Box::new(ScriptedSynthesizer {
            voices,
            state: state.clone(),
        })));
        (bridge, state)
    }

    #[tokio::test]
    async fn no_reply_is_a_noop() {
        let (mut bridge, state) = bridge_with(vec![]);
        assert!(!bridge.speak_reply(None, Language::En).await.unwrap());
        assert!(!bridge.speak_reply(Some(""), Language::En).await.unwrap());
        assert!(state.lock().unwrap().spoken.is_empty());
    }

    #[tokio::test]
    async fn unavailable_reports_capability_error() {
        let mut bridge = VoiceOutputBridge::unavailable();
        let err = bridge
            .speak_reply(Some("hello"), Language::En)
            .await
            .unwrap_err();
        assert!(err.is_capability());
    }

    #[tokio::test]
    async fn speak_cancels_then_speaks_with_matching_voice() {
        let (mut bridge, state) = bridge_with(vec![
            voice("Aditi", "hi-IN"),
            voice("Samantha", "en-US"),
        ]);
        assert!(
            bridge
                .speak_reply(Some("namaste"), Language::Hi)
                .await
                .unwrap()
        );

        let state = state.lock().unwrap();
        assert_eq!(state.cancels, 1);
        assert_eq!(state.spoken.len(), 1);
        let utterance = &state.spoken[0];
        assert_eq!(utterance.text, "namaste");
        assert_eq!(utterance.locale, "hi-IN");
        assert_eq!(utterance.voice.as_deref(), Some("Aditi"));
        assert_eq!(utterance.rate, 1.0);
    }

    #[tokio::test]
    async fn missing_voice_falls_back_to_engine_default() {
        let (mut bridge, state) = bridge_with(vec![voice("Samantha", "en-US")]);
        assert!(
            bridge
                .speak_reply(Some("namaskar"), Language::Mr)
                .await
                .unwrap()
        );
        let state = state.lock().unwrap();
        assert_eq!(state.spoken[0].voice, None);
        assert_eq!(state.spoken[0].locale, "mr-IN");
    }

    #[test]
    fn voice_selection_matches_language_prefix() {
        let voices = vec![
            voice("Samantha", "en-US"),
            voice("Kate", "en-GB"),
            voice("Aditi", "hi-IN"),
        ];
        assert_eq!(select_voice(&voices, "en-GB").map(|v| v.name.as_str()), Some("Samantha"));
        assert_eq!(select_voice(&voices, "hi-IN").map(|v| v.name.as_str()), Some("Aditi"));
        assert_eq!(select_voice(&voices, "mr-IN"), None);
    }
}
