use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("samvad.client.requests");
pub(crate) static CLIENT_TRANSPORT_ERRORS: Counter =
    Counter::new("samvad.client.transport_errors");
pub(crate) static CLIENT_SERVER_ERRORS: Counter = Counter::new("samvad.client.server_errors");
pub(crate) static CLIENT_MALFORMED_REPLIES: Counter =
    Counter::new("samvad.client.malformed_replies");

pub(crate) static SESSION_EXCHANGES: Counter = Counter::new("samvad.session.exchanges");
pub(crate) static SESSION_REJECTED_SENDS: Counter =
    Counter::new("samvad.session.rejected_sends");

pub(crate) static RECOGNITION_SESSIONS: Counter =
    Counter::new("samvad.speech.recognition_sessions");
pub(crate) static SYNTHESIS_UTTERANCES: Counter = Counter::new("samvad.speech.utterances");

pub(crate) static TRANSCRIPT_EXPORTS: Counter = Counter::new("samvad.export.files");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_TRANSPORT_ERRORS);
    collector.register_counter(&CLIENT_SERVER_ERRORS);
    collector.register_counter(&CLIENT_MALFORMED_REPLIES);

    collector.register_counter(&SESSION_EXCHANGES);
    collector.register_counter(&SESSION_REJECTED_SENDS);

    collector.register_counter(&RECOGNITION_SESSIONS);
    collector.register_counter(&SYNTHESIS_UTTERANCES);

    collector.register_counter(&TRANSCRIPT_EXPORTS);
}
