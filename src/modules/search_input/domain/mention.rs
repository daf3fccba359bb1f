use crate::modules::query_state::domain::entities::InputType;
use serde::{Deserialize, Serialize};

/// A pre-resolved entity substituted for free text by the autocomplete
/// collaborator. The classifier only reads these fields; it never resolves
/// mentions itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub address: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub blockchain: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub custom_input_type: Option<InputType>,
}

/// A mention anchored to a byte range of the raw search text.
///
/// Offsets come from the autocomplete collaborator and must lie on char
/// boundaries; spans that don't are ignored by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionSpan {
    pub start: usize,
    pub end: usize,
    pub mention: Mention,
}

/// One whitespace-delimited unit of the search input: either a plain word
/// or the text covered by a mention, with the original substring kept for
/// redisplay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSegment {
    pub word: String,
    pub mention: Option<Mention>,
    pub raw_value: String,
}
