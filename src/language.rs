use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A conversation language supported by the backend.
///
/// The wire code (`en`, `hi`, `mr`) is what gets sent with every request;
/// the BCP 47 locale tag is what the speech capabilities consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Hindi.
    Hi,
    /// Marathi.
    Mr,
}

impl Language {
    /// All selectable languages, in display order.
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Mr];

    /// The two-letter wire code sent to the backend.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
        }
    }

    /// The locale tag used to configure speech recognition and synthesis.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Hi => "hi-IN",
            Language::Mr => "mr-IN",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Mr => "Marathi",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            "mr" => Ok(Language::Mr),
            other => Err(Error::validation(
                format!("unsupported language code: {other}"),
                Some("lang".to_string()),
            )),
        }
    }
}

/// Maps an arbitrary language code to a recognition/synthesis locale.
///
/// Unrecognized codes fall back to `en-US`, mirroring how the speech
/// capabilities treat anything they do not know.
pub fn locale_for_code(code: &str) -> &'static str {
    code.parse::<Language>()
        .map(|lang| lang.locale())
        .unwrap_or("en-US")
}
