//! Plain-text transcript export.
//!
//! Serializes the whole transcript, one line per message, in the form
//! `[<HH:MM • DD/MM>] YOU|BOT: <body>`. There is no partial or incremental
//! export.

use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{Error, Result};
use crate::transcript::{Sender, Transcript, format_timestamp};

/// Timestamp embedded in export filenames: the ISO instant to the second,
/// with `:` and `T` replaced by `-` so the name is safe on every filesystem.
const FILENAME_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]-[hour]-[minute]-[second]");

/// The sender label used in exported lines.
pub fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "YOU",
        Sender::Bot => "BOT",
    }
}

/// Renders the transcript as export text, one line per message.
///
/// Embedded newlines in message bodies are collapsed to spaces so the
/// one-line-per-message framing survives a round trip.
pub fn export_lines(transcript: &Transcript) -> String {
    let lines: Vec<String> = transcript
        .messages()
        .iter()
        .map(|message| {
            let body = message.body.replace('\n', " ");
            format!(
                "[{}] {}: {}",
                format_timestamp(message.sent_at),
                sender_label(message.sender),
                body
            )
        })
        .collect();
    lines.join("\n")
}

/// Builds the export filename for the given instant.
pub fn export_filename(at: OffsetDateTime) -> Result<String> {
    let stamp = at
        .format(FILENAME_STAMP)
        .map_err(|err| Error::unknown(format!("failed to format export timestamp: {err}")))?;
    Ok(format!("chat_{stamp}.txt"))
}

/// Writes the transcript to a UTF-8 text file in `dir`, named with the
/// export instant, and returns the path of the file written.
pub fn write_export(transcript: &Transcript, dir: &Path) -> Result<PathBuf> {
    write_export_at(transcript, dir, OffsetDateTime::now_utc())
}

/// Like [`write_export`] but with a caller-supplied export instant.
pub fn write_export_at(
    transcript: &Transcript,
    dir: &Path,
    at: OffsetDateTime,
) -> Result<PathBuf> {
    let path = dir.join(export_filename(at)?);
    fs::write(&path, export_lines(transcript))
        .map_err(|err| Error::io("failed to write transcript export", err))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn sample_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push_at(Sender::User, "Hello", datetime!(2024-03-04 09:07:00 UTC));
        transcript.push_at(
            Sender::Bot,
            "Hi there",
            datetime!(2024-03-04 09:07:02 UTC),
        );
        transcript
    }

    #[test]
    fn lines_follow_the_fixed_format() {
        let text = export_lines(&sample_transcript());
        assert_eq!(
            text,
            "[09:07 • 04/03] YOU: Hello\n[09:07 • 04/03] BOT: Hi there"
        );
    }

    #[test]
    fn line_count_matches_message_count() {
        let transcript = sample_transcript();
        let text = export_lines(&transcript);
        assert_eq!(text.lines().count(), transcript.len());

        let empty = Transcript::new();
        assert_eq!(export_lines(&empty).lines().count(), 0);
    }

    #[test]
    fn embedded_newlines_collapse_to_spaces() {
        let mut transcript = Transcript::new();
        transcript.push_at(
            Sender::Bot,
            "line one\nline two\nline three",
            datetime!(2024-03-04 10:00:00 UTC),
        );
        let text = export_lines(&transcript);
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with("BOT: line one line two line three"));
    }

    #[test]
    fn round_trip_recovers_sender_and_body() {
        let transcript = sample_transcript();
        let text = export_lines(&transcript);
        for (line, message) in text.lines().zip(transcript.messages()) {
            let rest = line
                .split_once("] ")
                .map(|(_, rest)| rest)
                .expect("line has a timestamp prefix");
            let (label, body) = rest.split_once(": ").expect("line has a sender label");
            assert_eq!(label, sender_label(message.sender));
            assert_eq!(body, message.body);
        }
    }

    #[test]
    fn filename_encodes_the_instant() {
        let name = export_filename(datetime!(2024-01-02 03:04:05 UTC)).unwrap();
        assert_eq!(name, "chat_2024-01-02-03-04-05.txt");
        assert!(!name.contains(':'));
        assert!(!name.contains('T'));
    }

    #[test]
    fn write_export_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = sample_transcript();
        let path =
            write_export_at(&transcript, dir.path(), datetime!(2024-01-02 03:04:05 UTC)).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("chat_2024-01-02-03-04-05.txt")
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, export_lines(&transcript));
    }
}
